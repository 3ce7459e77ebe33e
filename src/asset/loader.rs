use std::sync::Arc;
use crate::{AssetError, AssetPath, HashMap, Protocol};

/// Takes the contents of a file, and converts them into an asset.
pub trait AssetLoader: Send + Sync + 'static {
    type AssetType;
    fn load(&self, bytes: &[u8], path: &AssetPath) -> anyhow::Result<Self::AssetType>;
    fn extensions(&self) -> &[&str];
}

/// Reads asset bytes through registered protocols and hands them to a loader.
#[derive(Default)]
pub struct AssetSource {
    protocols: HashMap<String, Arc<dyn Protocol>>,
    default_protocol: Option<String>,
}

impl AssetSource {

    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a protocol for use in reading bytes for asset loaders.
    pub fn add_protocol(&mut self, protocol: impl Protocol, is_default: bool) {
        let name = String::from(protocol.name());
        self.protocols.insert(name.clone(), Arc::new(protocol));
        if is_default {
            self.default_protocol = Some(name);
        }
    }

    /// Parses a path against the default protocol.
    pub fn path(&self, path: &str) -> Result<AssetPath, AssetError> {
        AssetPath::parse(path, self.default_protocol.as_deref())
    }

    /// Reads the file at the path specified and runs it through the loader.
    pub fn load<L: AssetLoader>(&self, loader: &L, path: &str) -> anyhow::Result<L::AssetType> {
        let path = self.path(path)?;
        if !loader.extensions().contains(&path.extension.as_str()) {
            return Err(AssetError::UnsupportedExtension { extension: path.extension }.into());
        }
        let protocol = self.protocols
            .get(&path.protocol)
            .ok_or_else(|| AssetError::UnknownProtocol { protocol: path.protocol.clone() })?;
        log::debug!("Loading {path}");
        let bytes = protocol.read(&path)?;
        loader.load(&bytes, &path)
    }
}

#[cfg(test)]
mod test {
    use crate::{AssetLoader, AssetPath, AssetSource, EmbeddedProtocol, FileProtocol};

    struct LengthLoader;
    impl AssetLoader for LengthLoader {
        type AssetType = usize;
        fn load(&self, bytes: &[u8], _path: &AssetPath) -> anyhow::Result<usize> {
            Ok(bytes.len())
        }
        fn extensions(&self) -> &[&str] {
            &["txt"]
        }
    }

    fn greetings() -> EmbeddedProtocol {
        EmbeddedProtocol::new()
            .with("greeting.txt", "hello")
            .with("greeting.tsx", "<tileset/>")
    }

    #[test]
    fn load_through_default_protocol() {
        let mut source = AssetSource::new();
        source.add_protocol(FileProtocol, false);
        source.add_protocol(greetings(), true);
        assert_eq!(5, source.load(&LengthLoader, "greeting.txt").unwrap());
        assert_eq!(5, source.load(&LengthLoader, "embedded://greeting.txt").unwrap());
        assert!(source.load(&LengthLoader, "farewell.txt").is_err());
    }

    #[test]
    fn rejects_foreign_extension() {
        let mut source = AssetSource::new();
        source.add_protocol(greetings(), true);
        assert!(source.load(&LengthLoader, "greeting.tsx").is_err());
    }

    #[test]
    fn rejects_unknown_protocol() {
        let mut source = AssetSource::new();
        source.add_protocol(FileProtocol, true);
        assert!(source.load(&LengthLoader, "http://greeting.txt").is_err());
    }
}
