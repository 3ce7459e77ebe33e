//! Structs defined here mirror those in [`crate::tileset`].
//! The main difference is that they're a 1:1 mapping of the tsx format,
//! with image sources left exactly as written and nothing validated.
use std::num::ParseIntError;
use std::str::Utf8Error;
use derive_more::*;
use roxmltree::{Document, Node};


#[derive(Clone, Default, Debug)]
pub struct Tileset {
    pub name: String,
    pub class: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub spacing: u32,
    pub margin: u32,
    pub tile_count: Option<u32>,
    pub columns: u32,
    pub image: Option<Image>,
    pub tiles: Vec<Tile>,
}

impl Tileset {

    pub fn parse_bytes(bytes: &[u8]) -> Result<Self, TsxParseError> {
        let xml_source = std::str::from_utf8(bytes)?;
        Self::parse_str(xml_source)
    }

    pub fn parse_str(xml_source: &str) -> Result<Self, TsxParseError> {
        let xml_doc = Document::parse(xml_source)?;
        Self::parse_doc(xml_doc)
    }

    pub fn parse_doc(doc: Document) -> Result<Self, TsxParseError> {
        let root = doc.root_element();
        match root.tag_name().name() {
            "tileset" => {
                let mut tileset = Tileset::default();
                tileset.parse(root)?;
                Ok(tileset)
            },
            tag_name => Err(TsxParseError::UnexpectedTag { tag_name: String::from(tag_name) }),
        }
    }

    pub fn parse(&mut self, tileset_node: Node) -> Result<(), TsxParseError> {

        // Parses attributes
        for attribute in tileset_node.attributes() {
            let name = attribute.name();
            let value = attribute.value();
            match name {
                "name" => self.name = String::from(value),
                "class" => self.class = String::from(value),
                "tilewidth" => self.tile_width = value.parse()?,
                "tileheight" => self.tile_height = value.parse()?,
                "spacing" => self.spacing = value.parse()?,
                "margin" => self.margin = value.parse()?,
                "tilecount" => self.tile_count = Some(value.parse()?),
                "columns" => self.columns = value.parse()?,
                _ => {}
            }
        }

        // Parses children
        for child in tileset_node.children() {
            match child.tag_name().name() {
                "image" => self.image = Some(Image::parse(child)?),
                "tile" => self.tiles.push(Tile::parse(child)?),
                _ => {}
            }
        }
        Ok(())
    }
}

#[derive(Clone, Eq, PartialEq, Default, Debug)]
pub struct Tile {
    /// ID of tile local to its tileset
    pub id: u32,
    /// Either the legacy "type" attribute, or the newer "class" attribute.
    pub class: String,
    pub image: Option<Image>,
}

impl Tile {
    pub fn parse(tile_node: Node) -> Result<Tile, TsxParseError> {
        let mut id = None;
        let mut class = String::new();
        for attribute in tile_node.attributes() {
            let value = attribute.value();
            match attribute.name() {
                "id" => id = Some(value.parse()?),
                "type" | "class" => class = String::from(value),
                _ => {}
            }
        }
        let Some(id) = id else {
            return Err(TsxParseError::MissingAttribute { tag_name: "tile", attribute: "id" })
        };

        let mut image = None;
        for child in tile_node.children() {
            if child.tag_name().name() == "image" {
                image = Some(Image::parse(child)?);
            }
        }
        Ok(Tile { id, class, image })
    }
}

#[derive(Clone, Eq, PartialEq, Default, Debug)]
pub struct Image {
    pub format: String,
    pub source: String,
    pub trans: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Image {
    pub fn parse(image_node: Node) -> Result<Image, TsxParseError> {
        let mut image = Image::default();
        for attribute in image_node.attributes() {
            let name = attribute.name();
            let value = attribute.value();
            match name {
                "format" => image.format = String::from(value),
                "source" => image.source = String::from(value),
                "trans" => image.trans = Some(String::from(value)),
                "width" => image.width = Some(value.parse()?),
                "height" => image.height = Some(value.parse()?),
                _ => {}
            }
        }
        Ok(image)
    }
}

#[derive(Error, Display, From, Debug)]
pub enum TsxParseError {
    #[display(fmt="{_0}")]
    XmlError(roxmltree::Error),
    #[display(fmt="{_0}")]
    Utf8Error(Utf8Error),
    #[display(fmt="{_0}")]
    ParseIntError(ParseIntError),
    #[display(fmt="Unexpected tag '{tag_name}'")]
    #[from(ignore)]
    UnexpectedTag { tag_name: String },
    #[display(fmt="Tag '{tag_name}' is missing attribute '{attribute}'")]
    #[from(ignore)]
    MissingAttribute { tag_name: &'static str, attribute: &'static str },
}
