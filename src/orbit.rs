use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::Error;

/// Name of the object every other object orbits directly or indirectly.
pub const ROOT: &str = "COM";
pub const YOU: &str = "YOU";
pub const SANTA: &str = "SAN";

pub type BodyId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    name: String,
    children: Vec<BodyId>, // Ids of bodies orbiting this one.
}

impl Body {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether nothing orbits this body.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Count of bodies orbiting this one directly.
    pub fn children_n(&self) -> usize {
        self.children.len()
    }
}

/// One `PARENT)CHILD` relation, the child (orbiter) orbits the parent (orbited).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orbit {
    orbited: String,
    orbiter: String,
}

impl Orbit {
    pub fn new(orbited: &str, orbiter: &str) -> Self {
        Self {
            orbited: orbited.to_string(),
            orbiter: orbiter.to_string(),
        }
    }

    pub fn orbited(&self) -> &str {
        &self.orbited
    }

    pub fn orbiter(&self) -> &str {
        &self.orbiter
    }
}

impl FromStr for Orbit {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        static ORBIT_REGEX: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^\s*([^)\s]+)\)([^)\s]+)\s*$").unwrap());

        let caps = ORBIT_REGEX
            .captures(value)
            .ok_or(Error::InvalidOrbitSpec(value.to_string()))?;
        Ok(Orbit::new(&caps[1], &caps[2]))
    }
}

#[derive(Debug)]
pub struct OrbitMap {
    bodies: Vec<Body>,
    body_ids: HashMap<String, BodyId>,
    root_id: BodyId,
}

impl OrbitMap {
    /// Builds the map from already parsed orbits, fails if no root object is among them.
    pub fn from_orbits<I>(orbits: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Orbit>,
    {
        let mut builder = OrbitMapBuilder::new();
        for orbit in orbits {
            builder.add_orbit(orbit);
        }

        builder.build()
    }

    pub fn from_lines<I, S>(lines: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = OrbitMapBuilder::new();
        for l in lines {
            builder.add_orbit(Orbit::from_str(l.as_ref())?);
        }

        builder.build()
    }

    pub fn root(&self) -> &Body {
        &self.bodies[self.root_id]
    }

    pub fn body(&self, name: &str) -> Option<&Body> {
        self.body_ids.get(name).map(|&id| &self.bodies[id])
    }

    pub fn has_body(&self, name: &str) -> bool {
        self.body_ids.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn children_of<'a>(&'a self, body: &'a Body) -> impl Iterator<Item = &'a Body> {
        body.children.iter().map(|&id| &self.bodies[id])
    }

    /// Total count of direct and indirect orbits, i.e. the sum of every body's depth below the root.
    pub fn count_orbits(&self) -> usize {
        self.depth_sum(self.root_id, 0)
    }

    /// Depth sum of the subtree rooted at the named body, which itself counts as `depth`.
    pub fn count_orbits_from(&self, name: &str, depth: usize) -> Option<usize> {
        self.body_ids.get(name).map(|&id| self.depth_sum(id, depth))
    }

    /// Count of objects the named body orbits directly or indirectly.
    pub fn orbit_count_of(&self, name: &str) -> Option<usize> {
        self.path_to(name).map(|path| path.len())
    }

    /// Names from the root down to the target's parent, the target excluded.
    pub fn path_to(&self, target: &str) -> Option<Vec<String>> {
        self.search_path(self.root_id, target)
    }

    /// Like `path_to`, but the search starts from the named body instead of the root.
    pub fn path_from(&self, start: &str, target: &str) -> Option<Vec<String>> {
        self.body_ids
            .get(start)
            .and_then(|&id| self.search_path(id, target))
    }

    /// Minimum transfers to move from the object `from` orbits to the object `to` orbits.
    pub fn transfers_between(&self, from: &str, to: &str) -> Result<usize, Error> {
        let from_path = self
            .path_to(from)
            .ok_or_else(|| Error::MissingBody(from.to_string()))?;
        let to_path = self
            .path_to(to)
            .ok_or_else(|| Error::MissingBody(to.to_string()))?;

        // Both paths start at the root, so the shared ancestors form a common prefix.
        let common_n = from_path
            .iter()
            .zip(to_path.iter())
            .take_while(|(l, r)| l == r)
            .count();
        debug!(
            ?from_path,
            ?to_path,
            common_n,
            "resolved transfer paths from {} to {}",
            from,
            to
        );

        Ok(from_path.len() + to_path.len() - 2 * common_n)
    }

    pub fn distance_to_santa(&self) -> Result<usize, Error> {
        self.transfers_between(YOU, SANTA)
    }

    fn depth_sum(&self, start_id: BodyId, start_depth: usize) -> usize {
        let mut sum = 0;
        let mut pending = vec![(start_id, start_depth)];
        while let Some((id, depth)) = pending.pop() {
            sum += depth;
            pending.extend(self.bodies[id].children.iter().map(|&c| (c, depth + 1)));
        }

        sum
    }

    fn search_path(&self, start_id: BodyId, target: &str) -> Option<Vec<String>> {
        // DFS, ancestors holds the chain of ids leading to the body being visited.
        let mut ancestors: Vec<BodyId> = Vec::new();
        let mut pending = vec![(start_id, 0)];
        while let Some((id, depth)) = pending.pop() {
            ancestors.truncate(depth);
            let body = &self.bodies[id];
            if body.name == target {
                return Some(
                    ancestors
                        .iter()
                        .map(|&a| self.bodies[a].name.clone())
                        .collect(),
                );
            }

            ancestors.push(id);
            pending.extend(body.children.iter().rev().map(|&c| (c, depth + 1)));
        }

        None
    }
}

impl FromStr for OrbitMap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_lines(s.lines())
    }
}

struct OrbitMapBuilder {
    bodies: Vec<Body>,
    body_ids: HashMap<String, BodyId>,
    orbit_n: usize,
}

impl OrbitMapBuilder {
    fn new() -> Self {
        Self {
            bodies: Vec::new(),
            body_ids: HashMap::new(),
            orbit_n: 0,
        }
    }

    fn add_orbit(&mut self, orbit: Orbit) {
        trace!(orbited = %orbit.orbited, orbiter = %orbit.orbiter, "add orbit");
        let orbited_id = self.get_or_add_body(&orbit.orbited);
        let orbiter_id = self.get_or_add_body(&orbit.orbiter);
        self.bodies[orbited_id].children.push(orbiter_id);
        self.orbit_n += 1;
    }

    fn get_or_add_body(&mut self, name: &str) -> BodyId {
        *self.body_ids.entry(name.to_string()).or_insert_with(|| {
            let id = self.bodies.len();
            self.bodies.push(Body::new(name));

            id
        })
    }

    fn build(self) -> Result<OrbitMap, Error> {
        let root_id = self
            .bodies
            .iter()
            .position(|b| b.name == ROOT)
            .ok_or(Error::NoRoot(ROOT.to_string()))?;
        debug!(
            bodies = self.bodies.len(),
            orbits = self.orbit_n,
            root = ROOT,
            "built orbit map"
        );

        Ok(OrbitMap {
            bodies: self.bodies,
            body_ids: self.body_ids,
            root_id,
        })
    }
}

pub fn read_orbits<P>(path: P) -> Result<OrbitMap, Error>
where
    P: AsRef<Path>,
{
    let orbit_file = File::open(path).map_err(Error::IOError)?;
    let reader = BufReader::new(orbit_file);
    let mut builder = OrbitMapBuilder::new();
    for l in reader.lines() {
        let s = l.map_err(Error::IOError)?;
        builder.add_orbit(Orbit::from_str(&s)?);
    }

    builder.build()
}

#[cfg(test)]
const SAMPLE_ORBITS: [&str; 11] = [
    "COM)B", "B)C", "C)D", "D)E", "E)F", "B)G", "G)H", "D)I", "E)J", "J)K", "K)L",
];

#[cfg(test)]
fn sample_with_travellers() -> OrbitMap {
    OrbitMap::from_lines(SAMPLE_ORBITS.iter().chain(["K)YOU", "I)SAN"].iter())).unwrap()
}

#[test]
fn test_parse_orbit() {
    assert_eq!("COM)B".parse::<Orbit>().unwrap(), Orbit::new("COM", "B"));
    assert_eq!(" K)YOU \r".parse::<Orbit>().unwrap(), Orbit::new("K", "YOU"));
    assert!(matches!(
        "COM-B".parse::<Orbit>(),
        Err(Error::InvalidOrbitSpec(_))
    ));
    assert!(matches!(
        "A)B)C".parse::<Orbit>(),
        Err(Error::InvalidOrbitSpec(_))
    ));
    assert!(matches!("".parse::<Orbit>(), Err(Error::InvalidOrbitSpec(_))));
    assert!(matches!(
        "COM) B".parse::<Orbit>(),
        Err(Error::InvalidOrbitSpec(_))
    ));
}

#[test]
fn test_parse_orbit_with_punctuated_names() {
    assert_eq!("COM)A-1".parse::<Orbit>().unwrap(), Orbit::new("COM", "A-1"));
    assert_eq!("B.2)X".parse::<Orbit>().unwrap(), Orbit::new("B.2", "X"));
    assert_eq!("C'3)X".parse::<Orbit>().unwrap(), Orbit::new("C'3", "X"));

    let orbit_map = OrbitMap::from_lines(["COM)A-1", "A-1)YOU", "COM)SAN"]).unwrap();
    assert_eq!(orbit_map.len(), 4);
    assert_eq!(orbit_map.count_orbits(), 1 + 2 + 1);
    assert_eq!(
        orbit_map.path_to(YOU),
        Some(vec![ROOT.to_string(), "A-1".to_string()])
    );
    assert_eq!(orbit_map.distance_to_santa().unwrap(), 1);
}

#[test]
fn test_build_orbit_map() {
    let orbit_map = OrbitMap::from_lines(SAMPLE_ORBITS).unwrap();
    assert_eq!(orbit_map.len(), 12);
    assert_eq!(orbit_map.root().name(), ROOT);
    assert!(orbit_map.has_body("L"));
    assert!(!orbit_map.has_body(YOU));
    assert!(orbit_map.body("L").unwrap().is_leaf());
    assert_eq!(orbit_map.body("B").unwrap().children_n(), 2);
    let mut b_children = orbit_map
        .children_of(orbit_map.body("B").unwrap())
        .map(|b| b.name())
        .collect::<Vec<_>>();
    b_children.sort_unstable();
    assert_eq!(b_children, vec!["C", "G"]);
}

#[test]
fn test_root_has_no_parent() {
    let orbit_map = sample_with_travellers();
    let root = orbit_map.root();
    assert!(orbit_map
        .bodies()
        .all(|b| orbit_map.children_of(b).all(|c| c.name() != root.name())));
    assert_eq!(orbit_map.bodies().filter(|b| b.name() == ROOT).count(), 1);
}

#[test]
fn test_missing_root() {
    assert!(matches!(
        OrbitMap::from_lines(["A)B", "B)C"]),
        Err(Error::NoRoot(_))
    ));
    assert!(matches!(OrbitMap::from_lines(Vec::<&str>::new()), Err(Error::NoRoot(_))));
}

#[test]
fn test_count_orbits() {
    let chain = OrbitMap::from_lines(["COM)A", "A)B", "B)C"]).unwrap();
    assert_eq!(chain.count_orbits(), 6);

    let long_chain_n = 100;
    let long_chain = OrbitMap::from_orbits((0..long_chain_n).map(|i| {
        let orbited = if i == 0 {
            ROOT.to_string()
        } else {
            format!("N{}", i - 1)
        };
        Orbit::new(&orbited, &format!("N{}", i))
    }))
    .unwrap();
    assert_eq!(long_chain.count_orbits(), long_chain_n * (long_chain_n + 1) / 2);

    assert_eq!(OrbitMap::from_lines(SAMPLE_ORBITS).unwrap().count_orbits(), 42);
    assert_eq!(OrbitMap::from_lines(["COM)A"]).unwrap().count_orbits(), 1);
}

#[test]
fn test_deep_chain() {
    let chain_n: usize = 100_000;
    let chain = OrbitMap::from_orbits((0..chain_n).map(|i| {
        let orbited = if i == 0 {
            ROOT.to_string()
        } else {
            format!("N{}", i - 1)
        };
        Orbit::new(&orbited, &format!("N{}", i))
    }))
    .unwrap();
    assert_eq!(chain.count_orbits(), chain_n * (chain_n + 1) / 2);

    let deepest = format!("N{}", chain_n - 1);
    let path = chain.path_to(&deepest).unwrap();
    assert_eq!(path.len(), chain_n);
    assert_eq!(path.first().map(String::as_str), Some(ROOT));
    assert_eq!(path.last(), Some(&format!("N{}", chain_n - 2)));
    assert_eq!(chain.orbit_count_of(&deepest), Some(chain_n));
}

#[test]
fn test_count_orbits_ignores_child_order() {
    let mut reversed = SAMPLE_ORBITS;
    reversed.reverse();
    assert_eq!(
        OrbitMap::from_lines(reversed).unwrap().count_orbits(),
        OrbitMap::from_lines(SAMPLE_ORBITS).unwrap().count_orbits()
    );
}

#[test]
fn test_count_orbits_matches_path_lengths() {
    let orbit_map = sample_with_travellers();
    let path_len_sum: usize = orbit_map
        .bodies()
        .map(|b| orbit_map.orbit_count_of(b.name()).unwrap())
        .sum();
    assert_eq!(orbit_map.count_orbits(), path_len_sum);
    assert_eq!(orbit_map.orbit_count_of("D"), Some(3));
    assert_eq!(orbit_map.orbit_count_of("L"), Some(7));
    assert_eq!(orbit_map.orbit_count_of(ROOT), Some(0));
    assert_eq!(orbit_map.orbit_count_of("X"), None);
}

#[test]
fn test_count_orbits_from_subtree() {
    let orbit_map = OrbitMap::from_lines(SAMPLE_ORBITS).unwrap();
    // J(0) -> K(1) -> L(2)
    assert_eq!(orbit_map.count_orbits_from("J", 0), Some(3));
    assert_eq!(orbit_map.count_orbits_from("J", 5), Some(5 + 6 + 7));
    assert_eq!(orbit_map.count_orbits_from("X", 0), None);
}

#[test]
fn test_path_to() {
    let orbit_map = sample_with_travellers();
    assert_eq!(orbit_map.path_to("B"), Some(vec![ROOT.to_string()]));
    assert_eq!(orbit_map.path_to(ROOT), Some(vec![]));
    assert_eq!(
        orbit_map.path_to(YOU),
        Some(
            [ROOT, "B", "C", "D", "E", "J", "K"]
                .iter()
                .map(|s| s.to_string())
                .collect()
        )
    );
    assert_eq!(
        orbit_map.path_to(SANTA),
        Some(
            [ROOT, "B", "C", "D", "I"]
                .iter()
                .map(|s| s.to_string())
                .collect()
        )
    );
    assert_eq!(orbit_map.path_to("X"), None);
}

#[test]
fn test_path_from() {
    let orbit_map = sample_with_travellers();
    assert_eq!(
        orbit_map.path_from("E", "L"),
        Some(vec!["E".to_string(), "J".to_string(), "K".to_string()])
    );
    assert_eq!(orbit_map.path_from("G", "L"), None);
    assert_eq!(orbit_map.path_from("X", "L"), None);
}

#[test]
fn test_distance_to_santa() {
    let orbit_map = sample_with_travellers();
    assert_eq!(orbit_map.distance_to_santa().unwrap(), 4);
    assert_eq!(orbit_map.transfers_between(SANTA, YOU).unwrap(), 4);
    assert_eq!(orbit_map.transfers_between(YOU, YOU).unwrap(), 0);
    // C orbits B, L orbits K: B -> C -> D -> E -> J -> K.
    assert_eq!(orbit_map.transfers_between("C", "L").unwrap(), 5);
}

#[test]
fn test_distance_matches_symmetric_difference() {
    use std::collections::HashSet;

    let orbit_map = sample_with_travellers();
    let names = orbit_map
        .bodies()
        .map(|b| b.name().to_string())
        .collect::<Vec<_>>();
    for from in &names {
        for to in &names {
            let from_set = orbit_map
                .path_to(from)
                .unwrap()
                .into_iter()
                .collect::<HashSet<_>>();
            let to_set = orbit_map
                .path_to(to)
                .unwrap()
                .into_iter()
                .collect::<HashSet<_>>();
            assert_eq!(
                orbit_map.transfers_between(from, to).unwrap(),
                from_set.symmetric_difference(&to_set).count(),
                "transfers from {} to {}",
                from,
                to
            );
        }
    }
}

#[test]
fn test_distance_with_missing_target() {
    let orbit_map = OrbitMap::from_lines(SAMPLE_ORBITS).unwrap();
    assert!(matches!(
        orbit_map.distance_to_santa(),
        Err(Error::MissingBody(name)) if name == YOU
    ));
    assert!(matches!(
        orbit_map.transfers_between("L", SANTA),
        Err(Error::MissingBody(name)) if name == SANTA
    ));
}

#[test]
fn test_orbit_map_from_str() {
    let orbit_map = "COM)B\nB)C\nK)YOU\nC)K\nB)SAN\n"
        .parse::<OrbitMap>()
        .unwrap();
    assert_eq!(orbit_map.len(), 6);
    // YOU is under COM, B, C, K and SAN under COM, B, so K -> C -> B.
    assert_eq!(orbit_map.distance_to_santa().unwrap(), 2);
}
