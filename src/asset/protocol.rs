use anyhow::Context;
use crate::{AssetPath, HashMap};

/**
 * Where the bytes of a descriptor come from.
 * IE: the game directory on disk, or files compiled into the binary.
 */
pub trait Protocol: Send + Sync + 'static {
    /**
     * Name used before "://" in asset paths. IE: file, embedded.
     */
    fn name(&self) -> &str;
    /**
     * Reads the whole file at the path specified.
     */
    fn read(&self, path: &AssetPath) -> anyhow::Result<Vec<u8>>;
}

/**
 * Reads from the file system, relative to the working directory.
 */
#[derive(Copy, Clone, Debug)]
pub struct FileProtocol;
impl Protocol for FileProtocol {
    fn name(&self) -> &str { "file" }
    fn read(&self, path: &AssetPath) -> anyhow::Result<Vec<u8>> {
        let file_path = path.without_protocol();
        std::fs::read(&file_path).with_context(|| format!("Could not read '{file_path}'"))
    }
}

/**
 * Serves files compiled into the binary, keyed by their path without protocol.
 * Lets a built-in descriptor pretend to live somewhere in the game directory,
 * so the relative paths inside it still resolve.
 */
#[derive(Clone, Default, Debug)]
pub struct EmbeddedProtocol {
    files: HashMap<String, &'static str>,
}

impl EmbeddedProtocol {

    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `contents` at `path`.
    pub fn with(mut self, path: impl Into<String>, contents: &'static str) -> Self {
        self.files.insert(path.into(), contents);
        self
    }
}

impl Protocol for EmbeddedProtocol {
    fn name(&self) -> &str { "embedded" }
    fn read(&self, path: &AssetPath) -> anyhow::Result<Vec<u8>> {
        let file_path = path.without_protocol();
        let contents = self.files
            .get(&file_path)
            .with_context(|| format!("No embedded file at '{file_path}'"))?;
        Ok(contents.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod test {
    use crate::{AssetPath, EmbeddedProtocol, FileProtocol, Protocol};

    #[test]
    fn embedded_lookup_by_path() {
        let protocol = EmbeddedProtocol::new()
            .with("Development_Resources/Scene.tsx", "<tileset/>")
            .with("Levels/1_Scene.csv", "0,1");
        let scene = AssetPath::parse("embedded://Development_Resources/Scene.tsx", None).unwrap();
        assert_eq!(b"<tileset/>".to_vec(), protocol.read(&scene).unwrap());

        let missing = AssetPath::parse("embedded://Development_Resources/Props.tsx", None).unwrap();
        let err = protocol.read(&missing).unwrap_err();
        assert!(err.to_string().contains("Development_Resources/Props.tsx"));
    }

    #[test]
    fn file_error_names_path() {
        let path = AssetPath::parse("no_such_dir/Scene.tsx", Some("file")).unwrap();
        let err = FileProtocol.read(&path).unwrap_err();
        assert_eq!("Could not read 'no_such_dir/Scene.tsx'", err.to_string());
    }
}
