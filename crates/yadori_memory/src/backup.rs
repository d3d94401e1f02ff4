//! Backup & Restore. The engine owns only the semantic model — file
//! content comes from the collaborator, already read off disk.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{BackupError, BackupResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub checksum: String,
    pub file_count: usize,
    pub total_bytes: usize,
    pub seed_hash: String,
    pub hardware_platform: String,
    pub hardware_arch: String,
    pub growth_day: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupFile {
    pub path: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    pub manifest: Manifest,
    pub files: Vec<BackupFile>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub is_body_transplant: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreResult {
    pub restored_files: usize,
}

fn is_skipped(path: &Path) -> bool {
    if path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.ends_with(".tmp") || n == "heartbeat-messages.json")
        .unwrap_or(false)
    {
        return true;
    }
    path.components().any(|c| {
        c.as_os_str()
            .to_str()
            .map(|s| s.starts_with('.') && s != "." && s != "..")
            .unwrap_or(false)
    })
}

fn walk_files(workspace: &Path) -> std::io::Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    let mut stack = vec![workspace.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            let relative = path.strip_prefix(workspace).unwrap_or(&path).to_path_buf();
            if is_skipped(&relative) {
                continue;
            }
            if path.is_dir() {
                stack.push(path);
            } else if let Ok(content) = std::fs::read_to_string(&path) {
                let relative = relative.to_string_lossy().replace('\\', "/");
                out.push((relative, content));
            }
        }
    }
    out.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(out)
}

fn extract_field<'a>(seed_md: &'a str, label: &str) -> Option<&'a str> {
    seed_md.lines().find_map(|line| {
        let prefix = format!("**{label}:**");
        line.strip_prefix(&prefix).map(|rest| rest.trim())
    })
}

fn checksum_of(files: &[(String, String)]) -> String {
    let mut hasher = Sha256::new();
    for (path, content) in files {
        hasher.update(path.as_bytes());
        hasher.update(b"\0");
        hasher.update(content.as_bytes());
        hasher.update(b"\0");
    }
    format!("{:x}", hasher.finalize())[..16].to_string()
}

pub fn create_backup(workspace: &Path, version: &str) -> BackupResult<Bundle> {
    if !workspace.is_dir() {
        return Err(BackupError::WorkspaceNotFound(workspace.display().to_string()));
    }
    let files = walk_files(workspace)
        .map_err(|e| BackupError::WorkspaceNotFound(format!("{}: {e}", workspace.display())))?;
    if files.is_empty() {
        return Err(BackupError::WorkspaceEmpty(workspace.display().to_string()));
    }
    let Some((_, seed_md)) = files.iter().find(|(path, _)| path == "SEED.md") else {
        return Err(BackupError::MissingSeed);
    };

    let seed_hash = extract_field(seed_md, "Hash").unwrap_or("").to_string();
    let hardware_platform = extract_field(seed_md, "Platform").unwrap_or("").to_string();
    let hardware_arch = extract_field(seed_md, "Arch").unwrap_or("").to_string();
    let growth_day = extract_field(seed_md, "Growth Day")
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);

    let checksum = checksum_of(&files);
    let total_bytes = files.iter().map(|(_, c)| c.len()).sum();
    let file_count = files.len();

    tracing::info!(file_count, %checksum, "backup created");

    Ok(Bundle {
        manifest: Manifest {
            version: version.to_string(),
            checksum,
            file_count,
            total_bytes,
            seed_hash,
            hardware_platform,
            hardware_arch,
            growth_day,
        },
        files: files
            .into_iter()
            .map(|(path, content)| BackupFile { path, content })
            .collect(),
    })
}

pub fn serialize_backup(bundle: &Bundle) -> String {
    serde_json::to_string(bundle).expect("Bundle serialization cannot fail")
}

pub fn deserialize_backup(json: &str) -> BackupResult<Bundle> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| BackupError::InvalidJson(e.to_string()))?;

    if !value.get("files").map(|f| f.is_array()).unwrap_or(false) {
        return Err(BackupError::InvalidFormat("`files` is not an array".to_string()));
    }
    if value.get("manifest").is_none() {
        return Err(BackupError::InvalidFormat("missing `manifest`".to_string()));
    }

    serde_json::from_value(value).map_err(|e| BackupError::InvalidFormat(e.to_string()))
}

fn recompute_checksum(bundle: &Bundle) -> String {
    let files: Vec<(String, String)> = bundle
        .files
        .iter()
        .map(|f| (f.path.clone(), f.content.clone()))
        .collect();
    checksum_of(&files)
}

pub fn validate_backup(bundle: &Bundle, current_platform: &str, current_arch: &str) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let recomputed = recompute_checksum(bundle);
    if recomputed != bundle.manifest.checksum {
        errors.push(format!(
            "checksum mismatch: expected {}, got {recomputed}",
            bundle.manifest.checksum
        ));
    }

    if !bundle.files.iter().any(|f| f.path == "SEED.md") {
        errors.push("bundle is missing SEED.md".to_string());
    }
    if !bundle.files.iter().any(|f| f.path == "STATUS.md") {
        warnings.push("bundle is missing STATUS.md".to_string());
    }
    if !bundle.files.iter().any(|f| f.path == "state.json") {
        warnings.push("bundle is missing state.json".to_string());
    }

    let is_body_transplant =
        bundle.manifest.hardware_platform != current_platform || bundle.manifest.hardware_arch != current_arch;
    if is_body_transplant {
        warnings.push("Body transplant detected: hardware changed but this is the same soul".to_string());
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
        warnings,
        is_body_transplant,
    }
}

pub fn restore_backup(bundle: &Bundle, target_dir: &Path) -> BackupResult<RestoreResult> {
    if target_dir.join("SEED.md").exists() {
        return Err(BackupError::OneBodyViolation);
    }

    for file in &bundle.files {
        let dest = target_dir.join(&file.path);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| BackupError::WorkspaceNotFound(format!("{}: {e}", parent.display())))?;
        }
        std::fs::write(&dest, &file.content)
            .map_err(|e| BackupError::WorkspaceNotFound(format!("{}: {e}", dest.display())))?;
    }

    tracing::info!(restored_files = bundle.files.len(), "backup restored");

    Ok(RestoreResult {
        restored_files: bundle.files.len(),
    })
}

pub fn generate_backup_filename(manifest: &Manifest, now: DateTime<Utc>) -> String {
    let short_hash = &manifest.seed_hash[..manifest.seed_hash.len().min(8)];
    format!(
        "yadori-backup-{}-day{}-{}.json",
        now.format("%Y-%m-%d"),
        manifest.growth_day,
        short_hash
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_workspace() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("SEED.md"),
            "# SEED\n\n**Hash:** abcdef0123456789\n**Platform:** linux\n**Arch:** x86_64\n**Growth Day:** 3\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("STATUS.md"), "# STATUS\n").unwrap();
        std::fs::write(dir.path().join("state.json"), "{}").unwrap();
        dir
    }

    #[test]
    fn backup_is_deterministic_and_detects_tampering() {
        let dir = sample_workspace();
        let a = create_backup(dir.path(), "1").unwrap();
        let b = create_backup(dir.path(), "1").unwrap();
        assert_eq!(a.manifest.checksum, b.manifest.checksum);

        std::fs::write(dir.path().join("STATUS.md"), "# STATUS\nchanged\n").unwrap();
        let c = create_backup(dir.path(), "1").unwrap();
        assert_ne!(a.manifest.checksum, c.manifest.checksum);
    }

    #[test]
    fn round_trip_through_json() {
        let dir = sample_workspace();
        let bundle = create_backup(dir.path(), "1").unwrap();
        let json = serialize_backup(&bundle);
        let restored = deserialize_backup(&json).unwrap();
        assert_eq!(bundle, restored);
    }

    #[test]
    fn one_body_one_soul_blocks_restore() {
        let dir = sample_workspace();
        let bundle = create_backup(dir.path(), "1").unwrap();
        let err = restore_backup(&bundle, dir.path()).unwrap_err();
        assert_eq!(err, BackupError::OneBodyViolation);
        assert!(err.to_string().contains("One Body, One Soul"));
    }

    #[test]
    fn body_transplant_is_a_warning_not_a_rejection() {
        let dir = sample_workspace();
        let bundle = create_backup(dir.path(), "1").unwrap();
        let report = validate_backup(&bundle, "linux", "aarch64");
        assert!(report.is_body_transplant);
        assert!(report.valid);
        assert!(report.warnings.iter().any(|w| w.contains("Body transplant")));
    }
}
