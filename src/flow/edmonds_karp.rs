use crate::flow::residual::ResidualNetwork;
use std::collections::VecDeque;

/// Edmonds-Karp: repeatedly augments along a shortest path found by BFS.
pub(crate) fn run(net: &mut ResidualNetwork, source: usize, sink: usize) -> u64 {
    let mut total: u64 = 0;
    while let Some(path) = shortest_path(net, source, sink) {
        let bottleneck = path
            .iter()
            .map(|&arc| net.residual(arc))
            .min()
            .unwrap_or(0);
        if bottleneck == 0 {
            break;
        }
        path.iter().for_each(|&arc| net.push(arc, bottleneck));
        total = total.saturating_add(bottleneck);
    }
    total
}

/// Arcs of a shortest residual path, in order from `source`.
fn shortest_path(net: &ResidualNetwork, source: usize, sink: usize) -> Option<Vec<usize>> {
    let mut parent: Vec<Option<usize>> = vec![None; net.vertex_count()];
    let mut visited = vec![false; net.vertex_count()];
    visited[source] = true;
    let mut queue = VecDeque::from([source]);

    while let Some(u) = queue.pop_front() {
        if u == sink {
            break;
        }
        for &arc in net.outgoing(u) {
            let v = net.head(arc);
            if !visited[v] && net.residual(arc) > 0 {
                visited[v] = true;
                parent[v] = Some(arc);
                queue.push_back(v);
            }
        }
    }

    if !visited[sink] || source == sink {
        return None;
    }
    let mut path = Vec::new();
    let mut v = sink;
    while let Some(arc) = parent[v] {
        path.push(arc);
        v = net.head(arc ^ 1);
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uses_reverse_arcs() {
        // greedy 0-1-2-3 blocks both short routes unless flow is pushed back over 1->2
        let mut net = ResidualNetwork::new(4);
        net.add_edge(0, 1, 1);
        net.add_edge(0, 2, 1);
        net.add_edge(1, 2, 1);
        net.add_edge(1, 3, 1);
        net.add_edge(2, 3, 1);
        assert_eq!(2, run(&mut net, 0, 3));
    }

    #[test]
    fn test_disconnected_sink() {
        let mut net = ResidualNetwork::new(3);
        net.add_edge(0, 1, 4);
        assert_eq!(0, run(&mut net, 0, 2));
    }
}
