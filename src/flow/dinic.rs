use crate::flow::residual::ResidualNetwork;

/// Dinic's blocking-flow algorithm. Returns the value of the flow added.
pub(crate) fn run(net: &mut ResidualNetwork, source: usize, sink: usize) -> u64 {
    let mut total = 0;
    loop {
        let level = net.levels(source);
        if level[sink].is_none() {
            return total;
        }
        let mut cursor = vec![0usize; net.vertex_count()];
        loop {
            let pushed = augment(net, &level, &mut cursor, source, sink, u64::MAX);
            if pushed == 0 {
                break;
            }
            total = total.saturating_add(pushed);
        }
    }
}

/// Depth-first search restricted to the level graph. `cursor[u]` remembers the
/// first arc of `u` not yet known to be dead in this phase.
fn augment(
    net: &mut ResidualNetwork,
    level: &[Option<usize>],
    cursor: &mut [usize],
    u: usize,
    sink: usize,
    limit: u64,
) -> u64 {
    if u == sink {
        return limit;
    }
    while cursor[u] < net.outgoing(u).len() {
        let arc = net.outgoing(u)[cursor[u]];
        let v = net.head(arc);
        let residual = net.residual(arc);
        let advances = matches!((level[u], level[v]), (Some(lu), Some(lv)) if lv == lu + 1);
        if residual > 0 && advances {
            let pushed = augment(net, level, cursor, v, sink, limit.min(residual));
            if pushed > 0 {
                net.push(arc, pushed);
                return pushed;
            }
        }
        cursor[u] += 1;
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_network() {
        // CLRS figure 26.1, max flow 23
        let mut net = ResidualNetwork::new(6);
        for (u, v, c) in [
            (0, 1, 16),
            (0, 2, 13),
            (1, 3, 12),
            (2, 1, 4),
            (2, 4, 14),
            (3, 2, 9),
            (3, 5, 20),
            (4, 3, 7),
            (4, 5, 4),
        ] {
            net.add_edge(u, v, c);
        }
        assert_eq!(23, run(&mut net, 0, 5));
        // a second run on the saturated network finds nothing more
        assert_eq!(0, run(&mut net, 0, 5));
    }

    #[test]
    fn test_zero_capacity_path() {
        let mut net = ResidualNetwork::new(3);
        net.add_edge(0, 1, 10);
        net.add_edge(1, 2, 0);
        assert_eq!(0, run(&mut net, 0, 2));
    }
}
