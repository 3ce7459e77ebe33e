use crate::{TileKind, Tileset};

impl Tileset {

    /// Serializes the tileset as an image collection .tsx descriptor.
    /// A tile kind is only written as a "type" attribute when its image name would imply the other kind.
    pub fn to_tsx(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let tile_count = self.tile_count.unwrap_or(self.len() as u32);
        out.push_str(&format!(
            "<tileset name=\"{}\" tilewidth=\"{}\" tileheight=\"{}\" tilecount=\"{}\">\n",
            escape(&self.name), self.tile_width, self.tile_height, tile_count,
        ));
        for tile in self {
            let kind = if tile.kind == TileKind::from_image_path(&tile.image_path) {
                String::new()
            }
            else {
                format!(" type=\"{}\"", tile.kind.name())
            };
            out.push_str(&format!(" <tile id=\"{}\"{kind}>\n", tile.id));
            out.push_str(&format!(
                "  <image width=\"{}\" height=\"{}\" source=\"{}\"/>\n",
                tile.width, tile.height, escape(&tile.image_path),
            ));
            out.push_str(" </tile>\n");
        }
        out.push_str("</tileset>\n");
        out
    }
}

/// Escapes a value for use inside a double quoted attribute.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}
