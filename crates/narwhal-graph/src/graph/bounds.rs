use super::Graph;
use serde::Serialize;

/// Pannable area as `[[min_x, min_y], [max_x, max_y]]`.
pub type Extent = [[f64; 2]; 2];

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    /// Right edge of the widest node, before the back-edge lanes are added.
    pub max_node_x: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// The box grown by half its width and height on every side.
    pub fn extent(&self) -> Extent {
        let (w, h) = (self.width(), self.height());
        [
            [self.min_x - w / 2.0, self.min_y - h / 2.0],
            [self.max_x + w / 2.0, self.max_y + h / 2.0],
        ]
    }
}

impl Graph {
    /// Recomputes the box around all visible nodes.
    ///
    /// Vertically each node is padded by one pin width for its input and output bubbles.
    /// Horizontally one edge separation per numbered back edge is reserved right of the widest
    /// node.
    pub fn redetermine_bounding_box(&mut self, show_types: bool) -> Extent {
        let pin = self.config.pin_width;
        let mut b = BoundingBox {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 1.0,
            max_node_x: 1.0,
        };
        for node in self.nodes.iter().filter(|n| n.visible) {
            b.min_x = b.min_x.min(node.x);
            b.max_node_x = b.max_node_x.max(node.x + node.total_width(pin));
            b.min_y = b.min_y.min(node.y - pin);
            b.max_y = b.max_y.max(node.y + node.height_for(show_types) + pin);
        }
        b.max_x =
            b.max_node_x + f64::from(self.max_back_edge_number) * self.config.min_edge_separation;
        self.bounds = b;
        b.extent()
    }
}
