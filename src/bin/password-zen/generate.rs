use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::Context;
use clap::ArgAction;

use crate::ProgError;
use password_zen::CharsetOptions;

#[derive(clap::Args)]
pub(crate) struct GenerateArgs {
    /// Length of the generated password.
    #[arg(short, long, default_value_t = 12)]
    length: usize,
    /// Include digits.
    #[arg(
        short = 'd',
        long,
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    include_digits: bool,
    /// Include special characters like !@#$%^&*().
    #[arg(
        short = 's',
        long,
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    include_symbols: bool,
    /// Exclude ambiguous characters like il1Lo0O.
    #[arg(short, long)]
    exclude_ambiguous: bool,
    /// Custom character set to draw from; overrides the other character options.
    #[arg(short, long)]
    charset: Option<String>,
    /// Also copy the password to the clipboard.
    #[arg(long)]
    copy: bool,
}

impl GenerateArgs {
    fn charset_options(&self) -> CharsetOptions {
        CharsetOptions {
            include_digits: self.include_digits,
            include_symbols: self.include_symbols,
            exclude_ambiguous: self.exclude_ambiguous,
            custom: self.charset.clone(),
        }
    }
}

pub(crate) fn generate_password(args: GenerateArgs) -> Result<(), ProgError> {
    let charset = args.charset_options().resolve();
    let password = password_zen::generate(args.length, &charset)?;
    println!("{}", password.as_str());

    if args.copy {
        send_to_clipboard(password.as_str().as_bytes())
            .context("failed to copy the password to the clipboard")?;
        eprintln!("Copied to the clipboard.");
    }
    Ok(())
}

fn send_to_clipboard(data: &[u8]) -> anyhow::Result<()> {
    let mut child = clipboard_cmd()
        .stdin(Stdio::piped())
        .spawn()
        .context("failed to start the clipboard command")?;
    child
        .stdin
        .take()
        .context("clipboard command has no stdin")?
        .write_all(data)?;
    let status = child.wait()?;
    if !status.success() {
        anyhow::bail!("clipboard command exited with {}", status);
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn clipboard_cmd() -> Command {
    Command::new("pbcopy")
}

#[cfg(not(target_os = "macos"))]
fn clipboard_cmd() -> Command {
    let mut cmd = Command::new("xsel");
    cmd.arg("-b");
    cmd
}
