//! Connected-component labeling of binary masks.
//!
//! Two-pass algorithm with union-find equivalence resolution. Foreground
//! pixels are joined through their 4-connected neighbors (left, up). Final
//! component ids are `1..=count` in row-major order of each component's first
//! pixel, so the numbering does not depend on how equivalences were merged.

use ndarray::{Array2, ArrayView2};

/// Union-Find data structure for equivalence class resolution
struct UnionFind {
    parent: Vec<u32>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new() -> Self {
        // Slot 0 stands for background and is never merged.
        Self {
            parent: vec![0],
            rank: vec![0],
        }
    }

    fn make_set(&mut self) -> u32 {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        self.rank.push(0);
        id
    }

    fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        // Path compression
        let mut cur = x;
        while self.parent[cur as usize] != root {
            let next = self.parent[cur as usize];
            self.parent[cur as usize] = root;
            cur = next;
        }
        root
    }

    fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return;
        }
        let (rx, ry) = (root_x as usize, root_y as usize);
        if self.rank[rx] < self.rank[ry] {
            self.parent[rx] = root_y;
        } else if self.rank[rx] > self.rank[ry] {
            self.parent[ry] = root_x;
        } else {
            self.parent[ry] = root_x;
            self.rank[rx] += 1;
        }
    }
}

/// Bounding box and size of one labeled component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentStats {
    pub min_row: usize,
    pub min_col: usize,
    pub max_row: usize,
    pub max_col: usize,
    pub pixel_count: usize,
}

impl ComponentStats {
    fn new(row: usize, col: usize) -> Self {
        Self {
            min_row: row,
            min_col: col,
            max_row: row,
            max_col: col,
            pixel_count: 0,
        }
    }

    fn add_pixel(&mut self, row: usize, col: usize) {
        self.min_row = self.min_row.min(row);
        self.min_col = self.min_col.min(col);
        self.max_row = self.max_row.max(row);
        self.max_col = self.max_col.max(col);
        self.pixel_count += 1;
    }

    pub fn height(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    pub fn width(&self) -> usize {
        self.max_col - self.min_col + 1
    }
}

/// Result of [`label_components`].
#[derive(Debug, Clone)]
pub struct Labeling {
    /// 0 for background, component id otherwise.
    pub labels: Array2<u32>,
    /// `stats[id - 1]` describes component `id`.
    pub stats: Vec<ComponentStats>,
}

impl Labeling {
    pub fn count(&self) -> usize {
        self.stats.len()
    }
}

/// Label the 4-connected foreground components of a mask.
///
/// Any non-zero cell is foreground.
pub fn label_components(mask: ArrayView2<u8>) -> Labeling {
    let (height, width) = mask.dim();
    let mut labels = Array2::<u32>::zeros((height, width));
    let mut uf = UnionFind::new();

    // First pass: provisional labels and equivalences
    for y in 0..height {
        for x in 0..width {
            if mask[[y, x]] == 0 {
                continue;
            }

            let left = if x > 0 { labels[[y, x - 1]] } else { 0 };
            let top = if y > 0 { labels[[y - 1, x]] } else { 0 };

            labels[[y, x]] = match (left, top) {
                (0, 0) => uf.make_set(),
                (l, 0) => l,
                (0, t) => t,
                (l, t) => {
                    if l != t {
                        uf.union(l, t);
                    }
                    l.min(t)
                }
            };
        }
    }

    // Second pass: resolve roots, number them by first appearance
    let mut root_to_id = vec![0u32; uf.parent.len()];
    let mut stats: Vec<ComponentStats> = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let provisional = labels[[y, x]];
            if provisional == 0 {
                continue;
            }
            let root = uf.find(provisional) as usize;
            if root_to_id[root] == 0 {
                stats.push(ComponentStats::new(y, x));
                root_to_id[root] = stats.len() as u32;
            }
            let id = root_to_id[root];
            stats[id as usize - 1].add_pixel(y, x);
            labels[[y, x]] = id;
        }
    }

    Labeling { labels, stats }
}
