mod state;
pub(crate) mod traced_dijkstra;

pub(crate) use traced_dijkstra::{TracedPath, dijkstra_path};
