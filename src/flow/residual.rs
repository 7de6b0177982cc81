use std::collections::VecDeque;

#[derive(Clone, Debug)]
pub(crate) struct ResidualEdge {
    pub to: usize,
    pub capacity: u64,
    pub flow: u64,
}

impl ResidualEdge {
    fn residual(&self) -> u64 {
        self.capacity - self.flow
    }
}

/// Residual network with paired arcs: the reverse of arc `e` is `e ^ 1`.
///
/// Adjacency lists keep insertion order, which fixes the order in which both
/// solvers explore arcs and therefore the flow assignment they return.
#[derive(Clone, Debug)]
pub(crate) struct ResidualNetwork {
    adjacency: Vec<Vec<usize>>,
    edges: Vec<ResidualEdge>,
}

impl ResidualNetwork {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
            edges: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the index of the forward arc.
    pub fn add_edge(&mut self, from: usize, to: usize, capacity: u64) -> usize {
        let forward = self.edges.len();
        self.edges.push(ResidualEdge {
            to,
            capacity,
            flow: 0,
        });
        self.edges.push(ResidualEdge {
            to: from,
            capacity: 0,
            flow: 0,
        });
        self.adjacency[from].push(forward);
        self.adjacency[to].push(forward + 1);
        forward
    }

    pub fn outgoing(&self, vertex: usize) -> &[usize] {
        &self.adjacency[vertex]
    }

    pub fn head(&self, arc: usize) -> usize {
        self.edges[arc].to
    }

    /// Capacity left on `arc`, counting cancellation of flow on its twin.
    pub fn residual(&self, arc: usize) -> u64 {
        self.edges[arc].residual() + self.edges[arc ^ 1].flow
    }

    /// Pushes `amount` along `arc`, cancelling opposite flow first.
    pub fn push(&mut self, arc: usize, amount: u64) {
        let twin = arc ^ 1;
        let cancelled = amount.min(self.edges[twin].flow);
        self.edges[twin].flow -= cancelled;
        self.edges[arc].flow += amount - cancelled;
    }

    /// Net flow carried by a forward arc.
    pub fn flow(&self, arc: usize) -> u64 {
        self.edges[arc].flow
    }

    /// BFS distances over arcs with residual capacity; `None` when unreachable.
    pub fn levels(&self, source: usize) -> Vec<Option<usize>> {
        let mut level = vec![None; self.vertex_count()];
        level[source] = Some(0);
        let mut queue = VecDeque::from([source]);
        while let Some(u) = queue.pop_front() {
            let next = level[u].map(|l| l + 1);
            for &arc in self.outgoing(u) {
                let v = self.head(arc);
                if level[v].is_none() && self.residual(arc) > 0 {
                    level[v] = next;
                    queue.push_back(v);
                }
            }
        }
        level
    }

    /// Source side of the minimum cut once no augmenting path remains.
    pub fn reachable(&self, source: usize) -> Vec<bool> {
        self.levels(source).iter().map(Option::is_some).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_cancels_twin_flow_first() {
        let mut net = ResidualNetwork::new(2);
        let ab = net.add_edge(0, 1, 5);
        let ba = net.add_edge(1, 0, 5);

        net.push(ab, 3);
        assert_eq!(3, net.flow(ab));
        assert_eq!(2, net.residual(ab));
        // reverse arc of `ab` can give back what was pushed
        assert_eq!(3, net.residual(ab ^ 1));

        net.push(ab ^ 1, 2);
        assert_eq!(1, net.flow(ab));
        assert_eq!(0, net.flow(ba));
    }

    #[test]
    fn test_levels_skip_saturated_arcs() {
        let mut net = ResidualNetwork::new(3);
        let ab = net.add_edge(0, 1, 1);
        net.add_edge(1, 2, 1);
        assert_eq!(vec![Some(0), Some(1), Some(2)], net.levels(0));

        net.push(ab, 1);
        assert_eq!(vec![true, false, false], net.reachable(0));
    }
}
