//! Production delivery channels.
//!
//! Both channels drive the locally installed desktop mail client in an
//! OS-specific way; both require the client to be installed and to have
//! at least one configured account.
//!
//! - [`MailClientChannel`] (primary): the client's automation interface
//!   (Outlook COM via PowerShell on Windows, Mail.app via AppleScript
//!   on macOS).
//! - [`ComposeScriptChannel`] (secondary): command-line compose via the
//!   platform mailto handler.

use super::{DeliveryChannel, OutboundMessage};
use crate::error::{QuoteError, Result};
use std::process::Command;

/// Primary channel: the mail client's automation interface.
pub struct MailClientChannel;

impl DeliveryChannel for MailClientChannel {
    fn name(&self) -> &'static str {
        "mail client automation"
    }

    fn deliver(&self, message: &OutboundMessage) -> Result<()> {
        #[cfg(target_os = "windows")]
        {
            deliver_outlook_com(message)
        }

        #[cfg(target_os = "macos")]
        {
            deliver_apple_mail(message)
        }

        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            let _ = message;
            Err(QuoteError::Delivery(
                "no mail automation interface on this platform".to_string(),
            ))
        }
    }
}

#[cfg(target_os = "windows")]
fn deliver_outlook_com(message: &OutboundMessage) -> Result<()> {
    // Single-quoted PowerShell strings escape by doubling the quote.
    let ps_quote = |s: &str| s.replace('\'', "''");

    let mut script = String::from(
        "$ol = New-Object -ComObject Outlook.Application; $m = $ol.CreateItem(0); ",
    );
    script.push_str(&format!("$m.To = '{}'; ", ps_quote(&message.to)));
    if let Some(cc) = &message.cc {
        script.push_str(&format!("$m.CC = '{}'; ", ps_quote(cc)));
    }
    script.push_str(&format!("$m.Subject = '{}'; ", ps_quote(&message.subject)));
    script.push_str(&format!("$m.Body = '{}'; ", ps_quote(&message.body)));
    script.push_str("$m.Send()");

    let output = Command::new("powershell")
        .args(["-NoProfile", "-NonInteractive", "-Command", &script])
        .output()
        .map_err(|e| QuoteError::Delivery(format!("failed to run powershell: {}", e)))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(QuoteError::Delivery(format!(
            "Outlook automation exited with error: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )))
    }
}

#[cfg(target_os = "macos")]
fn deliver_apple_mail(message: &OutboundMessage) -> Result<()> {
    let as_quote = |s: &str| s.replace('\\', "\\\\").replace('"', "\\\"");

    let mut script = format!(
        "tell application \"Mail\"\n\
         set msg to make new outgoing message with properties {{subject:\"{}\", content:\"{}\", visible:false}}\n\
         tell msg to make new to recipient at end of to recipients with properties {{address:\"{}\"}}\n",
        as_quote(&message.subject),
        as_quote(&message.body),
        as_quote(&message.to),
    );
    if let Some(cc) = &message.cc {
        script.push_str(&format!(
            "tell msg to make new cc recipient at end of cc recipients with properties {{address:\"{}\"}}\n",
            as_quote(cc)
        ));
    }
    script.push_str("send msg\nend tell");

    let output = Command::new("osascript")
        .args(["-e", &script])
        .output()
        .map_err(|e| QuoteError::Delivery(format!("failed to run osascript: {}", e)))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(QuoteError::Delivery(format!(
            "Mail automation exited with error: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )))
    }
}

/// Secondary channel: hand the message to the platform mailto handler,
/// which opens a compose window in the default mail client.
pub struct ComposeScriptChannel;

impl DeliveryChannel for ComposeScriptChannel {
    fn name(&self) -> &'static str {
        "compose script"
    }

    fn deliver(&self, message: &OutboundMessage) -> Result<()> {
        #[cfg(target_os = "linux")]
        {
            let mut cmd = Command::new("xdg-email");
            cmd.args(["--subject", &message.subject, "--body", &message.body]);
            if let Some(cc) = &message.cc {
                cmd.args(["--cc", cc]);
            }
            cmd.arg(&message.to);
            run_compose(cmd)
        }

        #[cfg(target_os = "macos")]
        {
            let mut cmd = Command::new("open");
            cmd.arg(mailto_url(message));
            run_compose(cmd)
        }

        #[cfg(target_os = "windows")]
        {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", &mailto_url(message)]);
            run_compose(cmd)
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        {
            let _ = message;
            Err(QuoteError::Delivery(
                "no mailto handler on this platform".to_string(),
            ))
        }
    }
}

#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
fn run_compose(mut cmd: Command) -> Result<()> {
    let output = cmd
        .output()
        .map_err(|e| QuoteError::Delivery(format!("failed to spawn mailto handler: {}", e)))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(QuoteError::Delivery(format!(
            "mailto handler exited with error: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )))
    }
}

#[cfg(any(target_os = "macos", target_os = "windows"))]
fn mailto_url(message: &OutboundMessage) -> String {
    let mut url = format!(
        "mailto:{}?subject={}&body={}",
        percent_encode(&message.to),
        percent_encode(&message.subject),
        percent_encode(&message.body)
    );
    if let Some(cc) = &message.cc {
        url.push_str(&format!("&cc={}", percent_encode(cc)));
    }
    url
}

#[cfg(any(target_os = "macos", target_os = "windows", test))]
fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'@' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// The production chain: automation first, compose script as fallback.
pub fn default_channels() -> Vec<Box<dyn DeliveryChannel>> {
    vec![Box::new(MailClientChannel), Box::new(ComposeScriptChannel)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_encoding_covers_mailto_specials() {
        assert_eq!(percent_encode("a b&c"), "a%20b%26c");
        assert_eq!(percent_encode("sales@acme.example"), "sales@acme.example");
        assert_eq!(percent_encode("line\nbreak"), "line%0Abreak");
    }

    #[test]
    fn default_chain_is_automation_then_script() {
        let channels = default_channels();
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].name(), "mail client automation");
        assert_eq!(channels[1].name(), "compose script");
    }
}
