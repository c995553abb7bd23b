use super::{fetch_time, NoteSource, Records};
use crate::error::{NotepressError, Result};
use crate::parser::{
    parse_records, ATTACHMENTS_MARKER, ATTACHMENT_SEPARATOR, BODY_MARKER, RECORD_BOUNDARY,
};
use crate::process::run_with_timeout;
use std::process::Command;
use std::time::Duration;
use tracing::{debug, info};

/// Fetches notes modified in the last `lookback_days` from Notes.app.
pub struct AppleNotesSource {
    lookback_days: u32,
    timeout: Duration,
    program: String,
}

impl AppleNotesSource {
    pub fn new(lookback_days: u32, timeout: Duration) -> Self {
        Self {
            lookback_days,
            timeout,
            program: "osascript".to_string(),
        }
    }

    /// Runs `program` instead of `osascript` (it receives `-e <script>`).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// The AppleScript that prints the raw export.
    pub fn script(&self) -> String {
        format!(
            r#"set output to ""
tell application "Notes"
    set cutoff to (current date) - {days} * days
    repeat with theNote in (notes whose modification date > cutoff)
        set attachmentPaths to {{}}
        repeat with theAttachment in attachments of theNote
            try
                set end of attachmentPaths to (URL of theAttachment as text)
            end try
        end repeat
        set AppleScript's text item delimiters to "{separator}"
        set output to output & "{boundary}" & (name of theNote) & ", {body}" & (plaintext of theNote) & ", {attachments}" & (attachmentPaths as text) & linefeed
        set AppleScript's text item delimiters to ""
    end repeat
end tell
return output"#,
            days = self.lookback_days,
            separator = ATTACHMENT_SEPARATOR,
            boundary = RECORD_BOUNDARY,
            body = BODY_MARKER,
            attachments = ATTACHMENTS_MARKER,
        )
    }
}

impl NoteSource for AppleNotesSource {
    fn name(&self) -> &str {
        "Apple Notes"
    }

    fn fetch(&self) -> Result<Records> {
        info!(days = self.lookback_days, "fetching recent notes");
        let output = run_with_timeout(
            Command::new(&self.program).arg("-e").arg(self.script()),
            self.timeout,
        )?;

        if !output.success() {
            return Err(NotepressError::Source(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                output.stderr.trim()
            )));
        }

        debug!(bytes = output.stdout.len(), "received notes export");
        Ok(Box::new(parse_records(output.stdout, fetch_time())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_uses_parser_markers() {
        let script = AppleNotesSource::new(7, Duration::from_secs(30)).script();
        assert!(script.contains("(current date) - 7 * days"));
        assert!(script.contains(r#"& "name:" & (name of theNote) & ", body:""#));
        assert!(script.contains(r#"& ", attachments:" &"#));
        assert!(script.contains(r#"text item delimiters to "|""#));
    }

    #[cfg(unix)]
    #[test]
    fn test_fetch_parses_program_output() {
        // Stand-in for osascript that ignores its arguments.
        let temp = tempfile::TempDir::new().unwrap();
        let fake = temp.path().join("fake-osascript");
        std::fs::write(
            &fake,
            "#!/bin/sh\nprintf 'name:Trip Notes, body:Pack, attachments:\\n'\n",
        )
        .unwrap();
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();

        let records: Vec<_> = AppleNotesSource::new(7, Duration::from_secs(5))
            .with_program(fake.to_string_lossy())
            .fetch()
            .unwrap()
            .collect();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Trip Notes");
        assert_eq!(records[0].body, "Pack");
    }

    #[cfg(unix)]
    #[test]
    fn test_fetch_failure_is_a_source_error() {
        let source = AppleNotesSource::new(7, Duration::from_secs(5)).with_program("false");
        assert!(matches!(source.fetch(), Err(NotepressError::Source(_))));
    }
}
