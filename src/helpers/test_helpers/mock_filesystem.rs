use super::*;

/// An in-memory filesystem keyed by path. Clones share the same files.
#[derive(Debug, Clone, Default)]
pub struct MockFilesystem(Arc<Mutex<HashMap<String, String>>>);

impl MockFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(self, path: &str, contents: &str) -> Self {
        self.0
            .lock()
            .unwrap()
            .insert(path.to_string(), contents.to_string());
        self
    }

    pub fn boxed(&self) -> Filesystem {
        Box::new(self.clone())
    }
}

impl FilesystemTrait for MockFilesystem {
    fn is_file(&self, path: &Path) -> bool {
        let files = self.0.lock().unwrap();
        files.contains_key(&*path.to_string_lossy())
    }

    fn read_to_string(&self, path: &Path) -> Result<String, Box<dyn Error>> {
        let files = self.0.lock().unwrap();
        match files.get(&*path.to_string_lossy()) {
            Some(contents) => Ok(contents.clone()),
            None => Err(format!("reading {}: file not found", path.display()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_added_file() {
        let fs = MockFilesystem::new().add_file("a.json", "{}");
        assert!(fs.is_file(Path::new("a.json")));
        assert_eq!(fs.read_to_string(Path::new("a.json")).unwrap(), "{}");
    }

    #[test]
    fn missing_file_is_error() {
        let fs = MockFilesystem::new();
        assert!(!fs.is_file(Path::new("b.json")));
        assert!(fs.read_to_string(Path::new("b.json")).is_err());
    }
}
