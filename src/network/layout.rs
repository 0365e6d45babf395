//! Fixed-step force-directed layout.
//!
//! A discrete simulation in the Fruchterman-Reingold style: pairwise
//! repulsion between all nodes, attraction only along edges scaled by edge
//! weight, positions clamped to the canvas each step. It runs for a fixed
//! step budget and does not seek a true equilibrium, only a visually
//! separated layout.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::network::graph::{NetworkNode, NetworkOptions};

/// Minimum distance used when two nodes coincide.
const MIN_DISTANCE: f32 = 0.01;

/// Scatter the nodes and run the simulation in place.
///
/// Deterministic for a fixed input and seed.
pub(crate) fn run(nodes: &mut [NetworkNode], edges: &[(usize, usize, f32)], options: &NetworkOptions) {
    let n = nodes.len();
    if n == 0 {
        return;
    }

    // A degenerate canvas collapses to a 1x1 box rather than failing.
    let width = options.width.max(1.0);
    let height = options.height.max(1.0);

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    for node in nodes.iter_mut() {
        node.x = rng.random_range(0.0..width);
        node.y = rng.random_range(0.0..height);
    }
    if n == 1 {
        return;
    }

    // Repulsion constant derived from canvas area and node count.
    let k_squared = width * height / n as f32;
    let k = k_squared.sqrt();
    let initial_temperature = width.min(height) / 10.0;

    for step in 0..options.layout_steps {
        let mut displacement = vec![(0.0f32, 0.0f32); n];

        // Pairwise repulsion between all nodes, inverse-distance-squared.
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = nodes[i].x - nodes[j].x;
                let dy = nodes[i].y - nodes[j].y;
                let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let force = k_squared / (distance * distance);
                let fx = dx / distance * force;
                let fy = dy / distance * force;
                displacement[i].0 += fx;
                displacement[i].1 += fy;
                displacement[j].0 -= fx;
                displacement[j].1 -= fy;
            }
        }

        // Attraction only along edges, scaled by edge weight.
        for &(a, b, weight) in edges {
            let dx = nodes[a].x - nodes[b].x;
            let dy = nodes[a].y - nodes[b].y;
            let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
            let force = distance * distance / k * weight;
            let fx = dx / distance * force;
            let fy = dy / distance * force;
            displacement[a].0 -= fx;
            displacement[a].1 -= fy;
            displacement[b].0 += fx;
            displacement[b].1 += fy;
        }

        // Linear cooling caps the per-step movement.
        let temperature =
            initial_temperature * (1.0 - step as f32 / options.layout_steps as f32);
        for (node, &(dx, dy)) in nodes.iter_mut().zip(&displacement) {
            let length = (dx * dx + dy * dy).sqrt();
            if length > 0.0 {
                let limited = length.min(temperature);
                node.x += dx / length * limited;
                node.y += dy / length * limited;
            }
            node.x = node.x.clamp(0.0, width);
            node.y = node.y.clamp(0.0, height);
        }
    }
}
