//! JSON and plain-text persistence helpers for ~/.flappy/ save files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the ~/.flappy/ directory path, creating it if needed.
pub fn flappy_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".flappy");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a save file in ~/.flappy/.
pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(flappy_dir()?.join(filename))
}

/// Load a JSON file from ~/.flappy/, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(filename: &str) -> T {
    let path = match save_path(filename) {
        Ok(p) => p,
        Err(_) => return T::default(),
    };
    load_json_file_or_default(&path)
}

/// Same as [`load_json_or_default`] but for an explicit path.
pub fn load_json_file_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            log::info!("{} not loaded ({}), using defaults", path.display(), e);
            return T::default();
        }
    };
    serde_json::from_str(&json).unwrap_or_else(|e| {
        log::info!("{} is malformed ({}), using defaults", path.display(), e);
        T::default()
    })
}

/// Read a file holding a single decimal integer. Missing or unparsable → 0.
pub fn read_u32_or_default(path: &Path) -> u32 {
    fs::read_to_string(path)
        .ok()
        .and_then(|text| text.trim().parse().ok())
        .unwrap_or(0)
}

/// Overwrite a file with the decimal text of `value`.
pub fn write_u32(path: &Path, value: u32) -> io::Result<()> {
    fs::write(path, value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "flappy_persistence_{}_{}",
            std::process::id(),
            name
        ))
    }

    #[test]
    fn test_save_path_format() {
        let path = save_path("test.json").expect("save_path should succeed");
        assert!(path.to_string_lossy().ends_with(".flappy/test.json"));
    }

    #[test]
    fn test_load_missing_returns_default() {
        let val: Vec<String> = load_json_or_default("nonexistent_test_file_12345.json");
        assert!(val.is_empty());
    }

    #[test]
    fn test_load_invalid_json_returns_default() {
        let path = temp_file("invalid.json");
        fs::write(&path, "{ not json").unwrap();

        let val: Vec<u32> = load_json_file_or_default(&path);
        assert!(val.is_empty());

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_u32_roundtrip() {
        let path = temp_file("int.txt");
        write_u32(&path, 42).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "42");
        assert_eq!(read_u32_or_default(&path), 42);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_u32_tolerates_surrounding_whitespace() {
        let path = temp_file("ws.txt");
        fs::write(&path, "  17\n").unwrap();
        assert_eq!(read_u32_or_default(&path), 17);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_u32_missing_or_garbage_is_zero() {
        let path = temp_file("garbage.txt");
        assert_eq!(read_u32_or_default(&path), 0);

        fs::write(&path, "seven").unwrap();
        assert_eq!(read_u32_or_default(&path), 0);

        fs::write(&path, "-3").unwrap();
        assert_eq!(read_u32_or_default(&path), 0);

        fs::remove_file(path).ok();
    }
}
