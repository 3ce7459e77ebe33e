mod loader;
mod path;
mod protocol;

pub use loader::*;
pub use path::*;
pub use protocol::*;

use derive_more::*;

#[derive(Error, Display, Debug)]
pub enum AssetError {
    #[display(fmt="Path has no protocol and no default protocol is set")]
    NoDefaultProtocol,
    #[display(fmt="Path '{path}' is missing a file extension")]
    PathMissingExtension { path: String },
    #[display(fmt="Protocol '{protocol}' is not registered")]
    UnknownProtocol { protocol: String },
    #[display(fmt="Loader does not accept extension '{extension}'")]
    UnsupportedExtension { extension: String },
}
