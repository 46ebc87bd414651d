// Domain-level simulation entities and input/snapshot types.

/// Distinguishes the single input-driven entity from transient drifters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Drifter,
}

/// RGB color carried by entities and updated through the mirror protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    /// Parses an HTML-style `#rrggbb` string. Returns `None` for anything
    /// else; callers drop malformed payloads instead of erroring.
    pub fn from_hex(s: &str) -> Option<Rgb> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Rgb { r, g, b })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

pub struct SimEntity {
    pub id: u64,
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,

    // Unit travel direction; constructors keep it normalized.
    pub dir_x: f32,
    pub dir_y: f32,
    // World units per second, always positive.
    pub speed: f32,

    // Toroidal wrap at the margin boundary when set; otherwise the entity
    // travels unbounded and the scene loop recycles it once it has left.
    pub wrap_enabled: bool,
    pub active: bool,
    pub color: Rgb,
    // World-space half size used for visibility and clamp checks.
    pub half_extent: f32,
}

impl SimEntity {
    pub fn drifter(
        id: u64,
        x: f32,
        y: f32,
        dir_x: f32,
        dir_y: f32,
        speed: f32,
        half_extent: f32,
    ) -> Self {
        Self {
            id,
            kind: EntityKind::Drifter,
            x,
            y,
            dir_x,
            dir_y,
            speed,
            wrap_enabled: false,
            active: true,
            color: Rgb::BLACK,
            half_extent,
        }
    }

    pub fn player(id: u64, x: f32, y: f32, half_extent: f32, color: Rgb) -> Self {
        Self {
            id,
            kind: EntityKind::Player,
            x,
            y,
            dir_x: 1.0,
            dir_y: 0.0,
            speed: 0.0,
            wrap_enabled: false,
            active: true,
            color,
            half_extent,
        }
    }
}

/// Velocity vector fed in by the input surface for the player entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct VelocityInput {
    pub vx: f32,
    pub vy: f32,
}

#[derive(Debug, Clone)]
pub struct EntitySnapshot {
    pub id: u64,
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
    pub active: bool,
    pub color: Rgb,
}

impl From<&SimEntity> for EntitySnapshot {
    fn from(e: &SimEntity) -> Self {
        Self {
            id: e.id,
            kind: e.kind,
            x: e.x,
            y: e.y,
            active: e.active,
            color: e.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(
            Rgb::from_hex("#ff0080"),
            Some(Rgb {
                r: 255,
                g: 0,
                b: 128
            })
        );
        assert_eq!(Rgb::from_hex("#FF0080"), Rgb::from_hex("#ff0080"));
    }

    #[test]
    fn rejects_malformed_hex_colors() {
        assert_eq!(Rgb::from_hex("ff0080"), None);
        assert_eq!(Rgb::from_hex("#ff008"), None);
        assert_eq!(Rgb::from_hex("#ggzzyy"), None);
        assert_eq!(Rgb::from_hex(""), None);
    }

    #[test]
    fn hex_round_trip() {
        let c = Rgb { r: 231, g: 76, b: 60 };
        assert_eq!(Rgb::from_hex(&c.to_hex()), Some(c));
    }
}
