use crate::api::Update;
use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Diagnostic logging to stderr. `RUST_LOG` overrides the default level.
pub fn init() {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));

    builder
        .target(Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();
}

/// Append-only record of every lot the server reported as updated.
/// Opened once at startup and held for the life of the process.
pub struct UpdateLog {
    file: File,
}

impl UpdateLog {
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open update log {}", path.display()))?;
        Ok(UpdateLog { file })
    }

    /// Write one line for `update` and flush it.
    pub fn record(&mut self, update: &Update) -> Result<()> {
        writeln!(
            self.file,
            "{} {}",
            chrono::Local::now().format("%Y/%m/%d %H:%M:%S"),
            format_entry(update)
        )
        .context("Failed to write update log")?;
        self.file.flush().context("Failed to flush update log")?;
        Ok(())
    }

    pub fn record_all(&mut self, updates: &[Update]) -> Result<()> {
        for update in updates {
            self.record(update)?;
        }
        Ok(())
    }
}

impl From<File> for UpdateLog {
    fn from(file: File) -> Self {
        UpdateLog { file }
    }
}

fn format_entry(update: &Update) -> String {
    format!(
        "{{lot:{} part:{} expiration:{} on_hand:{} allocated:{}}}",
        update.lot, update.part, update.expiration, update.on_hand, update.allocated
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(lot: &str) -> Update {
        Update {
            lot: lot.into(),
            part: "P1".into(),
            expiration: "2025-01-01".into(),
            on_hand: "10".into(),
            allocated: "2".into(),
        }
    }

    #[test]
    fn entry_lists_every_field() {
        assert_eq!(
            format_entry(&update("L1")),
            "{lot:L1 part:P1 expiration:2025-01-01 on_hand:10 allocated:2}"
        );
    }

    #[test]
    fn records_are_appended_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lot-updater.log");

        let mut sink = UpdateLog::open(&path).unwrap();
        sink.record_all(&[update("L1"), update("L2")]).unwrap();
        drop(sink);

        let mut sink = UpdateLog::open(&path).unwrap();
        sink.record(&update("L3")).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        let first = "{lot:L1 part:P1 expiration:2025-01-01 on_hand:10 allocated:2}";
        assert!(lines[0].ends_with(first));
        assert!(lines[2].contains("lot:L3"));
    }

    #[test]
    fn open_fails_when_directory_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("lot-updater.log");
        assert!(UpdateLog::open(&path).is_err());
    }
}
