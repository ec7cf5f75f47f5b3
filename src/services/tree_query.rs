//! Härledda vyer över hela släktträdet
//!
//! `FamilyGraph` byggs om från grunden efter varje ändring. Barnlistor
//! härleds från föräldrareferenserna och sorteras på ID.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use tracing::{debug, warn};

use crate::db::Database;
use crate::models::{FamilyMember, HealthStatus};
use crate::utils::error::AppResult;

/// Åldersintervall, `max` = None betyder öppet uppåt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBucket {
    pub label: &'static str,
    pub min: u32,
    pub max: Option<u32>,
}

impl AgeBucket {
    pub fn contains(&self, age: u32) -> bool {
        age >= self.min && self.max.map_or(true, |max| age <= max)
    }
}

pub const AGE_BUCKETS: &[AgeBucket] = &[
    AgeBucket { label: "0-12", min: 0, max: Some(12) },
    AgeBucket { label: "13-19", min: 13, max: Some(19) },
    AgeBucket { label: "20-39", min: 20, max: Some(39) },
    AgeBucket { label: "40-59", min: 40, max: Some(59) },
    AgeBucket { label: "60-79", min: 60, max: Some(79) },
    AgeBucket { label: "80+", min: 80, max: None },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeBucketCount {
    pub bucket: AgeBucket,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionCount {
    pub condition: String,
    pub count: usize,
}

/// Sammanfattning för hälsoöversikten
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyInsights {
    pub member_count: usize,
    pub most_common_condition: Option<ConditionCount>,
    pub average_age: Option<f64>,
}

/// Ögonblicksbild av alla familjemedlemmar med härlett barnindex
#[derive(Debug, Clone, Default)]
pub struct FamilyGraph {
    members: BTreeMap<i64, FamilyMember>,
    children: HashMap<i64, Vec<i64>>,
    roots: Vec<i64>,
}

impl FamilyGraph {
    /// Medlemmar utan ID hoppas över
    pub fn new(members: Vec<FamilyMember>) -> Self {
        let members: BTreeMap<i64, FamilyMember> = members
            .into_iter()
            .filter_map(|m| m.id.map(|id| (id, m)))
            .collect();

        let mut children: HashMap<i64, Vec<i64>> = HashMap::new();
        let mut roots = Vec::new();

        // BTreeMap itererar i ID-ordning, så listorna blir sorterade
        for (id, member) in &members {
            match member.parent_id {
                Some(parent_id) if members.contains_key(&parent_id) => {
                    children.entry(parent_id).or_default().push(*id);
                }
                Some(parent_id) => {
                    warn!("Medlem {} pekar på saknad förälder {}, behandlas som rot", id, parent_id);
                    roots.push(*id);
                }
                None => roots.push(*id),
            }
        }

        debug!("Släktgraf byggd: {} medlemmar, {} rötter", members.len(), roots.len());

        Self {
            members,
            children,
            roots,
        }
    }

    /// Läs alla medlemmar från databasen
    pub fn load(db: &Database) -> AppResult<Self> {
        Ok(Self::new(db.members().find_all()?))
    }

    pub fn get(&self, id: i64) -> Option<&FamilyMember> {
        self.members.get(&id)
    }

    /// Alla medlemmar i ID-ordning
    pub fn members(&self) -> impl Iterator<Item = &FamilyMember> {
        self.members.values()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn children_of(&self, id: i64) -> Vec<&FamilyMember> {
        self.resolve(self.children.get(&id).map(Vec::as_slice).unwrap_or_default())
    }

    pub fn roots(&self) -> Vec<&FamilyMember> {
        self.resolve(&self.roots)
    }

    /// Effektiv förälder: en referens till en medlem som saknas räknas som rot
    fn parent_of(&self, id: i64) -> Option<i64> {
        self.members
            .get(&id)
            .and_then(|m| m.parent_id)
            .filter(|p| self.members.contains_key(p))
    }

    /// Syskongruppen inklusive medlemmen själv
    pub fn sibling_group(&self, id: i64) -> Vec<&FamilyMember> {
        if !self.members.contains_key(&id) {
            return Vec::new();
        }
        match self.parent_of(id) {
            Some(parent_id) => self.children_of(parent_id),
            None => self.roots(),
        }
    }

    /// Syskon utan medlemmen själv. För en rot är syskonen övriga rötter.
    pub fn siblings_of(&self, id: i64) -> Vec<&FamilyMember> {
        self.sibling_group(id)
            .into_iter()
            .filter(|m| m.id != Some(id))
            .collect()
    }

    /// Antal steg upp till en rot
    pub fn depth_of(&self, id: i64) -> usize {
        let mut depth = 0;
        let mut visited = HashSet::from([id]);
        let mut current = id;

        while let Some(parent_id) = self.parent_of(current) {
            if !visited.insert(parent_id) {
                warn!("Cykel i föräldrakedjan vid medlem {}, avbryter", parent_id);
                break;
            }
            depth += 1;
            current = parent_id;
        }

        depth
    }

    pub fn max_depth(&self) -> usize {
        self.members
            .keys()
            .map(|id| self.depth_of(*id))
            .max()
            .unwrap_or(0)
    }

    /// Förfäder från närmaste förälder och uppåt
    pub fn ancestors_of(&self, id: i64) -> Vec<&FamilyMember> {
        let mut ancestors = Vec::new();
        let mut visited = HashSet::from([id]);
        let mut current = id;

        while let Some(parent_id) = self.parent_of(current) {
            if !visited.insert(parent_id) {
                break;
            }
            if let Some(parent) = self.members.get(&parent_id) {
                ancestors.push(parent);
            }
            current = parent_id;
        }

        ancestors
    }

    /// Alla ättlingar, bredden först
    pub fn descendants_of(&self, id: i64) -> Vec<&FamilyMember> {
        let mut result = Vec::new();
        let mut visited = HashSet::from([id]);
        let mut queue = std::collections::VecDeque::from([id]);

        while let Some(current) = queue.pop_front() {
            for child in self.children_of(current) {
                if let Some(child_id) = child.id {
                    if visited.insert(child_id) {
                        result.push(child);
                        queue.push_back(child_id);
                    }
                }
            }
        }

        result
    }

    pub fn is_descendant(&self, candidate: i64, of: i64) -> bool {
        self.ancestors_of(candidate)
            .iter()
            .any(|m| m.id == Some(of))
    }

    /// Antal medlemmar per åldersintervall. Åldrar utanför alla
    /// intervall räknas i det sista.
    pub fn age_histogram(&self, buckets: &[AgeBucket]) -> Vec<AgeBucketCount> {
        let mut counts: Vec<AgeBucketCount> = buckets
            .iter()
            .map(|bucket| AgeBucketCount { bucket: *bucket, count: 0 })
            .collect();

        if counts.is_empty() {
            return counts;
        }

        let last = counts.len() - 1;
        for member in self.members.values() {
            let index = buckets
                .iter()
                .position(|b| b.contains(member.age))
                .unwrap_or(last);
            counts[index].count += 1;
        }

        counts
    }

    /// Förekomst per tillstånd, vanligast först och lika många i bokstavsordning
    pub fn condition_frequency(&self) -> Vec<ConditionCount> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for member in self.members.values() {
            for condition in &member.health_conditions {
                *counts.entry(condition.as_str()).or_default() += 1;
            }
        }

        let mut result: Vec<ConditionCount> = counts
            .into_iter()
            .map(|(condition, count)| ConditionCount {
                condition: condition.to_string(),
                count,
            })
            .collect();

        // Stabil sortering behåller bokstavsordningen vid lika antal
        result.sort_by(|a, b| b.count.cmp(&a.count));
        result
    }

    pub fn status_counts(&self) -> Vec<(HealthStatus, usize)> {
        HealthStatus::all()
            .iter()
            .map(|status| {
                let count = self
                    .members
                    .values()
                    .filter(|m| m.health_status == *status)
                    .count();
                (*status, count)
            })
            .collect()
    }

    pub fn insights(&self) -> FamilyInsights {
        let member_count = self.members.len();
        let average_age = if member_count == 0 {
            None
        } else {
            let total: u64 = self.members.values().map(|m| u64::from(m.age)).sum();
            Some(total as f64 / member_count as f64)
        };

        FamilyInsights {
            member_count,
            most_common_condition: self.condition_frequency().into_iter().next(),
            average_age,
        }
    }

    /// Alla unika tillstånd i familjen
    pub fn all_conditions(&self) -> BTreeSet<&str> {
        self.members
            .values()
            .flat_map(|m| m.health_conditions.iter().map(String::as_str))
            .collect()
    }

    fn resolve(&self, ids: &[i64]) -> Vec<&FamilyMember> {
        ids.iter().filter_map(|id| self.members.get(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: i64, parent_id: Option<i64>, name: &str) -> FamilyMember {
        let mut m = FamilyMember::new(name);
        m.id = Some(id);
        m.parent_id = parent_id;
        m
    }

    fn ids(members: &[&FamilyMember]) -> Vec<i64> {
        members.iter().filter_map(|m| m.id).collect()
    }

    fn sample() -> FamilyGraph {
        FamilyGraph::new(vec![
            member(1, None, "Alice"),
            member(2, Some(1), "Bob"),
            member(3, Some(1), "Carol"),
            member(4, Some(2), "Dan"),
            member(5, None, "Eve"),
        ])
    }

    #[test]
    fn test_children_and_roots() {
        let graph = sample();

        assert_eq!(graph.len(), 5);
        assert_eq!(ids(&graph.children_of(1)), vec![2, 3]);
        assert!(graph.children_of(3).is_empty());
        assert_eq!(ids(&graph.roots()), vec![1, 5]);
    }

    #[test]
    fn test_siblings_exclude_self() {
        let graph = sample();

        assert_eq!(ids(&graph.siblings_of(2)), vec![3]);
        assert_eq!(ids(&graph.sibling_group(2)), vec![2, 3]);
        assert!(graph.siblings_of(4).is_empty());

        // Rötter är syskon till varandra
        assert_eq!(ids(&graph.siblings_of(1)), vec![5]);
        assert!(graph.siblings_of(99).is_empty());
    }

    #[test]
    fn test_depth() {
        let graph = sample();

        assert_eq!(graph.depth_of(1), 0);
        assert_eq!(graph.depth_of(2), 1);
        assert_eq!(graph.depth_of(4), 2);
        assert_eq!(graph.max_depth(), 2);
        assert_eq!(FamilyGraph::default().max_depth(), 0);
    }

    #[test]
    fn test_depth_terminates_on_corrupt_cycle() {
        // Kan inte skapas via tjänsten, men skyddet ska hålla
        let graph = FamilyGraph::new(vec![
            member(1, Some(3), "A"),
            member(2, Some(1), "B"),
            member(3, Some(2), "C"),
        ]);

        assert_eq!(graph.depth_of(1), 2);
        assert_eq!(graph.ancestors_of(1).len(), 2);
        assert_eq!(graph.descendants_of(1).len(), 2);
    }

    #[test]
    fn test_missing_parent_is_root() {
        let graph = FamilyGraph::new(vec![member(1, Some(42), "Föräldralös")]);

        assert_eq!(ids(&graph.roots()), vec![1]);
        assert_eq!(graph.depth_of(1), 0);
    }

    #[test]
    fn test_ancestors_and_descendants() {
        let graph = sample();

        assert_eq!(ids(&graph.ancestors_of(4)), vec![2, 1]);
        assert_eq!(ids(&graph.descendants_of(1)), vec![2, 3, 4]);
        assert!(graph.is_descendant(4, 1));
        assert!(!graph.is_descendant(1, 4));
        assert!(!graph.is_descendant(5, 1));
    }

    #[test]
    fn test_age_histogram_sums_to_total() {
        let ages = [0, 12, 13, 19, 20, 45, 60, 79, 80, 101];
        let members = ages
            .iter()
            .enumerate()
            .map(|(i, age)| member(i as i64 + 1, None, "X").with_age(*age))
            .collect();
        let graph = FamilyGraph::new(members);

        let histogram = graph.age_histogram(AGE_BUCKETS);
        let counts: Vec<usize> = histogram.iter().map(|h| h.count).collect();
        assert_eq!(counts, vec![2, 2, 1, 1, 2, 2]);
        assert_eq!(counts.iter().sum::<usize>(), graph.len());

        // Luckor i intervallen hamnar i sista intervallet
        let partial = [AgeBucket { label: "barn", min: 0, max: Some(12) }];
        assert_eq!(graph.age_histogram(&partial)[0].count, graph.len());
        assert!(graph.age_histogram(&[]).is_empty());
    }

    #[test]
    fn test_condition_frequency_order() {
        let graph = FamilyGraph::new(vec![
            member(1, None, "A").with_conditions(["Diabetes", "Asthma"]),
            member(2, None, "B").with_conditions(["Diabetes", "Cancer"]),
            member(3, None, "C").with_conditions(["Diabetes", "Asthma"]),
            member(4, None, "D").with_conditions(["Arthritis"]),
        ]);

        let freq: Vec<(String, usize)> = graph
            .condition_frequency()
            .into_iter()
            .map(|c| (c.condition, c.count))
            .collect();
        assert_eq!(
            freq,
            vec![
                ("Diabetes".to_string(), 3),
                ("Asthma".to_string(), 2),
                ("Arthritis".to_string(), 1),
                ("Cancer".to_string(), 1),
            ]
        );
        assert_eq!(graph.all_conditions().len(), 4);
    }

    #[test]
    fn test_insights() {
        let graph = FamilyGraph::new(vec![
            member(1, None, "A").with_age(30).with_conditions(["Asthma"]),
            member(2, None, "B").with_age(50),
        ]);

        let insights = graph.insights();
        assert_eq!(insights.member_count, 2);
        assert_eq!(insights.average_age, Some(40.0));
        assert_eq!(
            insights.most_common_condition.map(|c| c.condition),
            Some("Asthma".to_string())
        );

        let empty = FamilyGraph::default().insights();
        assert_eq!(empty.member_count, 0);
        assert_eq!(empty.average_age, None);
        assert_eq!(empty.most_common_condition, None);
    }

    #[test]
    fn test_status_counts() {
        let mut critical = member(2, None, "B");
        critical.health_status = HealthStatus::Critical;
        let graph = FamilyGraph::new(vec![member(1, None, "A"), critical]);

        let counts = graph.status_counts();
        assert_eq!(counts.len(), HealthStatus::all().len());
        assert!(counts.contains(&(HealthStatus::Healthy, 1)));
        assert!(counts.contains(&(HealthStatus::Critical, 1)));
        assert!(counts.contains(&(HealthStatus::AtRisk, 0)));
    }

    #[test]
    fn test_load_from_database() {
        use crate::models::RelationshipType;
        use crate::services::MemberService;

        let db = Database::open_in_memory().unwrap();
        let service = MemberService::new(&db);
        let alice = service.create(FamilyMember::new("Alice"), None, RelationshipType::Child).unwrap().id.unwrap();
        let bob = service.create(FamilyMember::new("Bob"), Some(alice), RelationshipType::Child).unwrap().id.unwrap();
        let carol = service.create(FamilyMember::new("Carol"), Some(alice), RelationshipType::Child).unwrap().id.unwrap();

        let graph = FamilyGraph::load(&db).unwrap();
        assert_eq!(ids(&graph.siblings_of(bob)), vec![carol]);
        assert_eq!(ids(&graph.children_of(alice)), vec![bob, carol]);
    }
}
