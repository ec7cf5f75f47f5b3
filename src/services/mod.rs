//! Tjänster för Heritage Health
//!
//! Affärslogik för släktträdet som inte hör hemma i UI eller databas.

pub mod events;
pub mod layout;
pub mod member_service;
pub mod tree_query;

pub use events::{LoggingListener, RefreshFlag, TreeEvent, TreeListener};
pub use layout::{CanvasSize, FamilyTree, FamilyTreeLink, FamilyTreeNode, LayoutEngine, LayoutMode};
pub use member_service::{MemberPatch, MemberService};
pub use tree_query::{AgeBucket, AgeBucketCount, ConditionCount, FamilyGraph, FamilyInsights, AGE_BUCKETS};
