//! Static route graph with BFS pathfinding and travel-time summation.

use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};

use crate::types::Minutes;

/// Directed graph of named locations, fixed once built.
///
/// Node and edge declaration order is preserved: BFS visits children in the
/// order their edges were added, which decides the returned path when a graph
/// has several equal-hop routes to the same node.
#[derive(Debug, Clone)]
pub struct RouteGraph {
    depot: String,
    nodes: Vec<String>,
    out: HashMap<String, Vec<(String, Minutes)>>,
}

impl RouteGraph {
    /// Creates an empty graph rooted at `depot`.
    pub fn new(depot: impl Into<String>) -> Self {
        let depot = depot.into();
        let mut graph = Self {
            depot: depot.clone(),
            nodes: Vec::new(),
            out: HashMap::new(),
        };
        graph.register_node(depot);
        graph
    }

    /// Adds a directed edge, registering unseen endpoints as nodes.
    pub fn with_edge(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        minutes: Minutes,
    ) -> Self {
        let from = from.into();
        let to = to.into();
        self.register_node(from.clone());
        self.register_node(to.clone());
        self.out.entry(from).or_default().push((to, minutes));
        self
    }

    /// The reference warehouse topology: two branches of two leaf areas each.
    pub fn warehouse_map() -> Self {
        Self::new("Warehouse")
            .with_edge("Warehouse", "AreaA", 3)
            .with_edge("Warehouse", "AreaB", 4)
            .with_edge("AreaA", "AreaC", 3)
            .with_edge("AreaA", "AreaD", 3)
            .with_edge("AreaB", "AreaE", 4)
            .with_edge("AreaB", "AreaF", 4)
    }

    /// The fixed origin node all routes start from.
    pub fn depot(&self) -> &str {
        &self.depot
    }

    /// Breadth-first route from the depot to `destination`.
    ///
    /// Returns the node sequence including both endpoints, `[depot]` when the
    /// destination is the depot itself, and an empty vector when no route
    /// exists. Nodes are marked visited on dequeue, so a node can sit in the
    /// frontier more than once; the first dequeue wins.
    pub fn find_route(&self, destination: &str) -> Vec<String> {
        let mut frontier = VecDeque::new();
        frontier.push_back((self.depot.clone(), vec![self.depot.clone()]));
        let mut visited: HashSet<String> = HashSet::new();

        while let Some((current, path)) = frontier.pop_front() {
            if current == destination {
                return path;
            }
            if !visited.insert(current.clone()) {
                continue;
            }
            if let Some(children) = self.out.get(&current) {
                for (child, _) in children {
                    if !visited.contains(child) {
                        let mut next = path.clone();
                        next.push(child.clone());
                        frontier.push_back((child.clone(), next));
                    }
                }
            }
        }

        Vec::new()
    }

    /// Sums edge minutes over consecutive pairs in `route`.
    ///
    /// Pairs without a declared edge contribute 0.
    pub fn travel_time(&self, route: &[String]) -> Minutes {
        route
            .windows(2)
            .map(|pair| self.edge_minutes(&pair[0], &pair[1]).unwrap_or(0))
            .sum()
    }

    /// Outgoing neighbor names per node, in declaration order, for map display.
    pub fn adjacency(&self) -> Vec<(&str, Vec<&str>)> {
        self.nodes
            .iter()
            .map(|node| {
                let children = self
                    .out
                    .get(node)
                    .map(|edges| edges.iter().map(|(to, _)| to.as_str()).collect())
                    .unwrap_or_default();
                (node.as_str(), children)
            })
            .collect()
    }

    /// True when `name` is a node of this graph.
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.iter().any(|n| n == name)
    }

    fn edge_minutes(&self, from: &str, to: &str) -> Option<Minutes> {
        self.out
            .get(from)?
            .iter()
            .find(|(child, _)| child == to)
            .map(|(_, minutes)| *minutes)
    }

    fn register_node(&mut self, name: String) {
        if !self.nodes.contains(&name) {
            self.nodes.push(name);
        }
    }
}
