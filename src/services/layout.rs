//! Layout av släktträdet för ritytan

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::FamilyMember;
use crate::services::tree_query::FamilyGraph;

/// Rutbredd i rutnätsläget
pub const GRID_UNIT_WIDTH: f32 = 200.0;
/// Ruthöjd i rutnätsläget
pub const GRID_UNIT_HEIGHT: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutMode {
    /// Syskonordning i x-led, djup i y-led, normaliserat mot ritytan
    #[default]
    Hierarchy,
    /// Generation och nivå gånger fast rutstorlek
    Grid,
}

impl LayoutMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Hierarchy => "Hierarki",
            Self::Grid => "Rutnät",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// En placerad nod i trädet
#[derive(Debug, Clone)]
pub struct FamilyTreeNode {
    pub member: FamilyMember,
    pub x: f32,
    pub y: f32,
}

/// Kant från förälder till barn
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyTreeLink {
    pub from_id: i64,
    pub to_id: i64,
    pub from: (f32, f32),
    pub to: (f32, f32),
}

/// Färdigt layoutat träd
#[derive(Debug, Clone, Default)]
pub struct FamilyTree {
    pub nodes: HashMap<i64, FamilyTreeNode>,
    pub links: Vec<FamilyTreeLink>,
    pub mode: LayoutMode,
}

impl FamilyTree {
    pub fn get_node(&self, member_id: i64) -> Option<&FamilyTreeNode> {
        self.nodes.get(&member_id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Beräkna bounding box
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        if self.nodes.is_empty() {
            return (0.0, 0.0, 100.0, 100.0);
        }

        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;

        for node in self.nodes.values() {
            min_x = min_x.min(node.x);
            min_y = min_y.min(node.y);
            max_x = max_x.max(node.x);
            max_y = max_y.max(node.y);
        }

        (min_x, min_y, max_x, max_y)
    }
}

pub struct LayoutEngine {
    mode: LayoutMode,
}

impl LayoutEngine {
    pub fn new(mode: LayoutMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Placera alla medlemmar och skapa en kant per förälder-barn-par
    pub fn layout(&self, graph: &FamilyGraph, canvas: CanvasSize) -> FamilyTree {
        let mut tree = FamilyTree {
            mode: self.mode,
            ..Default::default()
        };

        if graph.is_empty() {
            return tree;
        }

        let max_depth = graph.max_depth();

        for member in graph.members() {
            let Some(id) = member.id else { continue };

            let (x, y) = match self.mode {
                LayoutMode::Hierarchy => hierarchy_position(graph, id, max_depth, canvas),
                LayoutMode::Grid => grid_position(member),
            };

            tree.nodes.insert(
                id,
                FamilyTreeNode {
                    member: member.clone(),
                    x,
                    y,
                },
            );
        }

        // Kanter först när alla positioner finns
        for member in graph.members() {
            let (Some(id), Some(parent_id)) = (member.id, member.parent_id) else {
                continue;
            };
            if let (Some(parent), Some(child)) = (tree.nodes.get(&parent_id), tree.nodes.get(&id)) {
                tree.links.push(FamilyTreeLink {
                    from_id: parent_id,
                    to_id: id,
                    from: (parent.x, parent.y),
                    to: (child.x, child.y),
                });
            }
        }

        debug!(
            "Layout ({:?}): {} noder, {} kanter",
            self.mode,
            tree.nodes.len(),
            tree.links.len()
        );

        tree
    }
}

fn hierarchy_position(graph: &FamilyGraph, id: i64, max_depth: usize, canvas: CanvasSize) -> (f32, f32) {
    let group = graph.sibling_group(id);
    let index = group.iter().position(|m| m.id == Some(id)).unwrap_or(0);

    let x = canvas.width * (index + 1) as f32 / (group.len() + 1) as f32;
    let y = canvas.height * (graph.depth_of(id) + 1) as f32 / (max_depth + 2) as f32;

    (x, y)
}

fn grid_position(member: &FamilyMember) -> (f32, f32) {
    (
        member.generation as f32 * GRID_UNIT_WIDTH,
        member.level as f32 * GRID_UNIT_HEIGHT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: i64, parent_id: Option<i64>, generation: i32, level: i32) -> FamilyMember {
        let mut m = FamilyMember::new(format!("M{}", id));
        m.id = Some(id);
        m.parent_id = parent_id;
        m.generation = generation;
        m.level = level;
        m
    }

    fn sample_graph() -> FamilyGraph {
        FamilyGraph::new(vec![
            member(1, None, 0, 0),
            member(2, Some(1), 1, 1),
            member(3, Some(1), 1, 1),
            member(4, Some(3), -1, -2),
        ])
    }

    #[test]
    fn test_empty_graph() {
        let tree = LayoutEngine::new(LayoutMode::Hierarchy)
            .layout(&FamilyGraph::default(), CanvasSize::new(400.0, 300.0));

        assert!(tree.is_empty());
        assert!(tree.links.is_empty());
        assert_eq!(tree.bounds(), (0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_hierarchy_positions() {
        let tree = LayoutEngine::new(LayoutMode::Hierarchy)
            .layout(&sample_graph(), CanvasSize::new(300.0, 400.0));

        // Maxdjup 2 ger y = höjd * (djup + 1) / 4
        let root = tree.get_node(1).unwrap();
        assert_eq!((root.x, root.y), (150.0, 100.0));

        let bob = tree.get_node(2).unwrap();
        let carol = tree.get_node(3).unwrap();
        assert_eq!((bob.x, bob.y), (100.0, 200.0));
        assert_eq!((carol.x, carol.y), (200.0, 200.0));

        let grandchild = tree.get_node(4).unwrap();
        assert_eq!((grandchild.x, grandchild.y), (150.0, 300.0));
    }

    #[test]
    fn test_grid_positions_allow_negative() {
        let tree = LayoutEngine::new(LayoutMode::Grid)
            .layout(&sample_graph(), CanvasSize::new(1.0, 1.0));

        let node = tree.get_node(2).unwrap();
        assert_eq!((node.x, node.y), (200.0, 100.0));

        let node = tree.get_node(4).unwrap();
        assert_eq!((node.x, node.y), (-200.0, -200.0));
        assert_eq!(tree.bounds(), (-200.0, -200.0, 200.0, 100.0));
        assert_eq!(tree.mode, LayoutMode::Grid);
    }

    #[test]
    fn test_one_link_per_parented_member() {
        let tree = LayoutEngine::new(LayoutMode::Hierarchy)
            .layout(&sample_graph(), CanvasSize::new(300.0, 400.0));

        assert_eq!(tree.links.len(), 3);
        let link = tree.links.iter().find(|l| l.to_id == 4).unwrap();
        assert_eq!(link.from_id, 3);
        assert_eq!(link.from, (200.0, 200.0));
        assert_eq!(link.to, (150.0, 300.0));
    }
}
