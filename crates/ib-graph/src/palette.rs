//! Fixed node and edge colors.
//!
//! Two palettes exist, one for a white canvas and one tuned for a black
//! canvas. Nothing is computed at runtime.

use ib_core::Rgb;
use ib_topology::NodeKind;

/// Fill and edge colors for both node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub hca_fill: Rgb,
    pub hca_edge: Rgb,
    pub switch_fill: Rgb,
    pub switch_edge: Rgb,
}

pub const STANDARD: Palette = Palette {
    hca_fill: Rgb::from_u32(0xff8080),
    hca_edge: Rgb::from_u32(0xff0000),
    switch_fill: Rgb::from_u32(0xd5f6ff),
    switch_edge: Rgb::from_u32(0x000000),
};

pub const BLACK_BACKGROUND: Palette = Palette {
    hca_fill: Rgb::from_u32(0xcccccc),
    hca_edge: Rgb::from_u32(0xff0000),
    switch_fill: Rgb::from_u32(0xffffff),
    switch_edge: Rgb::from_u32(0xa0a0a0),
};

/// Fill shared by every cluster ("yellow").
pub const CLUSTER_FILL: Rgb = Rgb::from_u32(0xffff00);

/// Canvas color in black-background mode.
pub const BLACK: Rgb = Rgb::from_u32(0x000000);

impl Palette {
    pub fn for_background(optimize_black_bg: bool) -> &'static Palette {
        if optimize_black_bg {
            &BLACK_BACKGROUND
        } else {
            &STANDARD
        }
    }

    /// Fill color of a node; its outline uses the same color.
    pub fn node_fill(&self, kind: NodeKind) -> Rgb {
        match kind {
            NodeKind::Switch => self.switch_fill,
            NodeKind::Hca => self.hca_fill,
        }
    }

    /// Edge color: HCA edge color if either end is an HCA.
    pub fn edge_color(&self, a: NodeKind, b: NodeKind) -> Rgb {
        if a.is_hca() || b.is_hca() {
            self.hca_edge
        } else {
            self.switch_edge
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_table() {
        let p = Palette::for_background(false);
        assert_eq!(p.node_fill(NodeKind::Hca).to_string(), "#ff8080");
        assert_eq!(p.node_fill(NodeKind::Switch).to_string(), "#d5f6ff");
        assert_eq!(p.edge_color(NodeKind::Switch, NodeKind::Switch).to_string(), "#000000");
        assert_eq!(p.edge_color(NodeKind::Switch, NodeKind::Hca).to_string(), "#ff0000");

        let p = Palette::for_background(true);
        assert_eq!(p.node_fill(NodeKind::Hca).to_string(), "#cccccc");
        assert_eq!(p.node_fill(NodeKind::Switch).to_string(), "#ffffff");
        assert_eq!(p.edge_color(NodeKind::Switch, NodeKind::Switch).to_string(), "#a0a0a0");
        assert_eq!(p.edge_color(NodeKind::Hca, NodeKind::Switch).to_string(), "#ff0000");
    }

    #[test]
    fn hca_to_hca_uses_hca_edge() {
        assert_eq!(STANDARD.edge_color(NodeKind::Hca, NodeKind::Hca), STANDARD.hca_edge);
    }
}
