use std::fmt;
use crate::AssetError;

/**
 * Deconstructed path to a file.
 */
#[derive(Clone, Eq, PartialEq, Default, Debug, Hash)]
pub struct AssetPath {
    pub protocol: String,
    pub body: String,
    pub extension: String,
}

impl AssetPath {

    pub fn parse(path: &str, default_protocol: Option<&str>) -> Result<Self, AssetError> {
        let protocol: Option<&str>;
        let mut remainder = path;

        // Reads protocol
        match remainder.split_once("://") {
            Some((left, right)) => {
                protocol = Some(left);
                remainder = right;
            },
            None => protocol = None,
        };
        let Some(protocol) = protocol.or(default_protocol) else {
            return Err(AssetError::NoDefaultProtocol)
        };

        // Reads body and extension.
        // Only the file name may hold the extension, directories like ".." are part of the body.
        let file_start = remainder.rfind('/').map(|idx| idx + 1).unwrap_or(0);
        let (body, extension) = match remainder[file_start..].rsplit_once('.') {
            Some((stem, extension)) if !stem.is_empty() => {
                let body_end = file_start + stem.len();
                (&remainder[..body_end], extension)
            },
            _ => return Err(AssetError::PathMissingExtension { path: String::from(path) }),
        };

        Ok(Self {
            protocol: protocol.into(),
            body: body.into(),
            extension: extension.into(),
        })
    }

    /// Body and extension. No protocol.
    pub fn without_protocol(&self) -> String {
        format!("{}.{}", self.body, self.extension)
    }

    /// Parent directory of this file.
    /// None if the path is relative and has no directory. "/" for a file at the filesystem root.
    pub fn parent(&self) -> Option<String> {
        match self.body.rsplit_once('/')? {
            ("", _) => Some(String::from("/")),
            (parent, _) => Some(String::from(parent)),
        }
    }

    /// Resolves a path written relative to this file's directory.
    /// "." and ".." segments are folded, absolute paths are returned as is.
    pub fn resolve(&self, relative: &str) -> String {
        if relative.starts_with('/') {
            return String::from(relative);
        }
        let parent = self.parent().unwrap_or_default();
        let absolute = parent.starts_with('/');
        let mut parts: Vec<&str> = parent
            .split('/')
            .filter(|part| !part.is_empty() && *part != ".")
            .collect();
        for segment in relative.split('/') {
            match segment {
                "" | "." => {},
                ".." => match parts.last() {
                    Some(last) if *last != ".." => { parts.pop(); },
                    _ if absolute => {},
                    _ => parts.push(".."),
                },
                segment => parts.push(segment),
            }
        }
        let joined = parts.join("/");
        if absolute { format!("/{joined}") } else { joined }
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}.{}", self.protocol, self.body, self.extension)
    }
}

#[cfg(test)]
mod test {
    use crate::AssetPath;

    #[test]
    fn parse() {
        let path = AssetPath::parse("Development_Resources/Scene.tsx", Some("file")).unwrap();
        assert_eq!("file", path.protocol);
        assert_eq!("Development_Resources/Scene", path.body);
        assert_eq!("tsx", path.extension);
        assert_eq!("file://Development_Resources/Scene.tsx", path.to_string());
        assert_eq!("Development_Resources/Scene.tsx", path.without_protocol());
    }

    #[test]
    fn parse_dotted_directories() {
        let path = AssetPath::parse("embedded://../data.v2/Scene.tsx", None).unwrap();
        assert_eq!("embedded", path.protocol);
        assert_eq!("../data.v2/Scene", path.body);
        assert_eq!("tsx", path.extension);
    }

    #[test]
    fn parse_failures() {
        assert!(AssetPath::parse("Scene.tsx", None).is_err());
        assert!(AssetPath::parse("Textures/Floor", Some("file")).is_err());
        assert!(AssetPath::parse("Textures/.hidden", Some("file")).is_err());
    }

    #[test]
    fn parent() {
        let nested = AssetPath::parse("a/b/Scene.tsx", Some("file")).unwrap();
        assert_eq!(Some(String::from("a/b")), nested.parent());
        let root = AssetPath::parse("Scene.tsx", Some("file")).unwrap();
        assert_eq!(None, root.parent());
        let filesystem_root = AssetPath::parse("/Scene.tsx", Some("file")).unwrap();
        assert_eq!(Some(String::from("/")), filesystem_root.parent());
    }

    #[test]
    fn resolve() {
        let path = AssetPath::parse("Development_Resources/Scene.tsx", Some("file")).unwrap();
        assert_eq!("Textures/Floor_Clay_0.bmp", path.resolve("../Textures/Floor_Clay_0.bmp"));
        assert_eq!("Development_Resources/Floor.bmp", path.resolve("./Floor.bmp"));
        assert_eq!("/opt/Floor.bmp", path.resolve("/opt/Floor.bmp"));

        let root = AssetPath::parse("Scene.tsx", Some("file")).unwrap();
        assert_eq!("../Textures/Wall_Stone_0.bmp", root.resolve("../Textures/Wall_Stone_0.bmp"));

        let absolute = AssetPath::parse("/game/Development_Resources/Scene.tsx", Some("file")).unwrap();
        assert_eq!("/game/Textures/Wall_Bricks_1.bmp", absolute.resolve("../Textures/Wall_Bricks_1.bmp"));

        let filesystem_root = AssetPath::parse("/Scene.tsx", Some("file")).unwrap();
        assert_eq!("/Textures/Floor_Clay_0.bmp", filesystem_root.resolve("../Textures/Floor_Clay_0.bmp"));
        assert_eq!("/Floor.bmp", filesystem_root.resolve("Floor.bmp"));
    }
}
