use std::{error::Error, path::Path};

/// A mockable interface to the files the server reads at startup (config and scenarios)
pub trait FilesystemTrait {
    /// Like std::path::Path::is_file()
    fn is_file(&self, path: &Path) -> bool;
    /// Like std::fs::read_to_string(), but the error names the file
    fn read_to_string(&self, path: &Path) -> Result<String, Box<dyn Error>>;
}

pub type Filesystem = Box<dyn FilesystemTrait>;

pub fn real_filesystem() -> Filesystem {
    Box::new(FilesystemImpl)
}

struct FilesystemImpl;

impl FilesystemTrait for FilesystemImpl {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String, Box<dyn Error>> {
        std::fs::read_to_string(path).map_err(|e| format!("reading {}: {}", path.display(), e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn workspace_path(parts: &[&str]) -> PathBuf {
        let mut buf = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        for part in parts {
            buf.push(part);
        }
        buf
    }

    #[test]
    fn bundled_scenario_is_file() {
        let fs = real_filesystem();
        assert!(fs.is_file(&workspace_path(&["scenarios", "interceptor_vs_target.json"])));
    }

    #[test]
    fn directory_is_not_file() {
        let fs = real_filesystem();
        assert!(!fs.is_file(&workspace_path(&["scenarios"])));
    }

    #[test]
    fn can_read_file_to_string() {
        let fs = real_filesystem();
        let contents = fs.read_to_string(&workspace_path(&["Cargo.toml"])).unwrap();
        assert!(contents.starts_with("[package]\n"));
    }

    #[test]
    fn missing_file_error_names_the_path() {
        let fs = real_filesystem();
        let err = fs
            .read_to_string(&workspace_path(&["not-a-file.json"]))
            .unwrap_err();
        assert!(err.to_string().contains("not-a-file.json"));
    }
}
