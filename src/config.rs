use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::{fs, io::Write, path::Path, path::PathBuf};

use crate::constants::{COMPANY_NAME, PREFERENCES_FILE, PRODUCT_NAME, RESULTS_FILE};

#[derive(Debug, Clone)]
pub struct Paths {
    pub cfg_dir: PathBuf,
    pub prefs_file: PathBuf,
    pub results_file: PathBuf,
    pub log_dir: PathBuf,
}

impl Paths {
    /// Lay the store out under `base`, e.g. a temp dir in tests.
    pub fn under(base: &Path) -> Self {
        let cfg_dir = base.join("cfg");
        Self {
            prefs_file: cfg_dir.join(PREFERENCES_FILE),
            results_file: cfg_dir.join(RESULTS_FILE),
            cfg_dir,
            log_dir: base.join("logs"),
        }
    }
}

pub fn project_paths() -> Result<Paths> {
    let dirs = ProjectDirs::from("com", COMPANY_NAME, PRODUCT_NAME)
        .context("Failed to determine project directories")?;
    let cfg_dir = dirs.config_dir().to_path_buf();
    Ok(Paths {
        prefs_file: cfg_dir.join(PREFERENCES_FILE),
        results_file: cfg_dir.join(RESULTS_FILE),
        cfg_dir,
        log_dir: dirs.data_local_dir().join("logs"),
    })
}

/// `None` when the file is missing or does not parse as `T`.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let data = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = ?e, path = ?path, "config: ignoring unreadable file");
            None
        }
    }
}

pub fn save_atomic<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).ok();
    }
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(value)?;
    {
        let mut f = fs::File::create(&tmp).context("create temp file")?;
        f.write_all(&data).context("write temp file")?;
        f.sync_all().ok();
    }
    // Best-effort atomic replace.
    fs::rename(&tmp, path).context("rename temp to final")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_under_base() {
        let paths = Paths::under(Path::new("/tmp/k"));
        assert_eq!(paths.prefs_file, Path::new("/tmp/k/cfg/preferences.json"));
        assert_eq!(paths.results_file, Path::new("/tmp/k/cfg/results.json"));
        assert_eq!(paths.log_dir, Path::new("/tmp/k/logs"));
    }

    #[test]
    fn save_then_load() {
        let td = tempfile::tempdir().expect("tmpdir");
        let path = td.path().join("nested").join("values.json");
        save_atomic(&vec![1u32, 2, 3], &path).expect("save");
        assert_eq!(load_json::<Vec<u32>>(&path), Some(vec![1, 2, 3]));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn missing_or_corrupt_files_load_as_none() {
        let td = tempfile::tempdir().expect("tmpdir");
        let path = td.path().join("values.json");
        assert_eq!(load_json::<Vec<u32>>(&path), None);
        fs::write(&path, "{not json").unwrap();
        assert_eq!(load_json::<Vec<u32>>(&path), None);
    }
}
