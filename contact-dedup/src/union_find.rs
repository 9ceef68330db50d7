/// Disjoint-set forest over `0..len` with path compression and union by rank.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

/// Outcome of joining two distinct sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Joined {
    pub root: usize,
    pub absorbed: usize,
}

impl UnionFind {
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    pub fn find(&mut self, element: usize) -> usize {
        let mut root = element;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = element;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    /// Returns `None` when `a` and `b` were already in the same set.
    pub fn union(&mut self, a: usize, b: usize) -> Option<Joined> {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return None;
        }

        let (root, absorbed) = if self.rank[root_a] < self.rank[root_b] {
            (root_b, root_a)
        } else {
            (root_a, root_b)
        };

        self.parent[absorbed] = root;
        if self.rank[root] == self.rank[absorbed] {
            self.rank[root] += 1;
        }

        Some(Joined { root, absorbed })
    }

    #[cfg(test)]
    fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}
