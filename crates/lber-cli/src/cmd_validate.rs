/// Implementation of `lber validate`.
///
/// Runs a strict decode over the whole file and reports either a series
/// of success checkmarks (`✓`) or a diagnostic failure line (`✗`). The
/// command exits with code 0 on a valid file and code 1 on any error
/// (the main dispatcher in `main.rs` converts `Err` to exit code 1).
///
/// # Success output
///
/// ```text
/// ✓ PDUs: 3 messages decoded
/// ✓ Termination: file ends on a PDU boundary
/// ✓ Grammar: every TLV legal in its state
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error: unexpected tag 0x66 in state MSG_ID of LdapMessage
/// ```
use std::fs;

use anyhow::{Context, Result, anyhow};
use lber_codec::LdapDecoder;

use crate::ValidateArgs;

/// Run the `lber validate` command.
///
/// Prints a validation report to stdout and returns `Ok(())` on
/// success. On any structural error, prints a `✗` diagnostic and
/// returns `Err`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or if any PDU fails a
/// structural check.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let mut session = LdapDecoder::new().session();
    let decoded = match session.feed(&bytes).and_then(|messages| {
        session.finish()?;
        Ok(messages)
    }) {
        Ok(messages) => messages,
        Err(e) => {
            println!("✗ Error: {e}");
            return Err(anyhow!("validation failed"));
        }
    };

    println!(
        "✓ PDUs: {} message{} decoded",
        decoded.len(),
        if decoded.len() == 1 { "" } else { "s" }
    );
    println!("✓ Termination: file ends on a PDU boundary");
    println!("✓ Grammar: every TLV legal in its state");
    Ok(())
}
