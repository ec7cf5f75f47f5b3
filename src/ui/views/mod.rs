pub mod cultural_practices;
pub mod family_tree;
pub mod health_overview;
pub mod health_resources;
pub mod member_detail;
pub mod member_list;
pub mod settings;

pub use cultural_practices::CulturalPracticesView;
pub use family_tree::FamilyTreeView;
pub use health_overview::HealthOverviewView;
pub use health_resources::HealthResourcesView;
pub use member_detail::MemberDetailView;
pub use member_list::MemberListView;
pub use settings::SettingsView;
