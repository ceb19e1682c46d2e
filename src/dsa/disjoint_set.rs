// union by rank + path compression
pub(crate) struct DisjointSet {
    parent:Vec<usize>,
    // upper bound of the tree depth below each root
    depth:Vec<usize>,
    size:Vec<usize>
}

impl DisjointSet {
    pub(crate) fn new(len:usize) -> Self {
        Self {
            parent:(0..len).collect(),
            depth:vec![0;len],
            size:vec![1;len]
        }
    }
    pub(crate) fn len(&self) -> usize {
        self.parent.len()
    }
    pub(crate) fn find(&mut self,x:usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // second pass points every visited node straight at the root
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }
    // false if x and y were already in the same set
    pub(crate) fn unite(&mut self,x:usize,y:usize) -> bool {
        let mut x = self.find(x);
        let mut y = self.find(y);
        if x == y {
            return false;
        }
        if self.depth[x] < self.depth[y] {
            std::mem::swap(&mut x, &mut y);
        }
        self.parent[y] = x;
        self.size[x] += self.size[y];
        if self.depth[x] == self.depth[y] {
            self.depth[x] += 1;
        }
        true
    }
    pub(crate) fn same(&mut self,x:usize,y:usize) -> bool {
        self.find(x) == self.find(y)
    }
    #[cfg(test)]
    pub(crate) fn size(&mut self,x:usize) -> usize {
        let root = self.find(x);
        self.size[root]
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::DisjointSet;

    type HashSet<K> = std::collections::hash_set::HashSet<K,nohash::BuildNoHashHasher<usize>>;

    // connected component of `start` by plain graph search over the raw pairs
    fn naive_component(pairs:&[(usize,usize)],start:usize) -> HashSet<usize> {
        let mut seen = HashSet::with_hasher(nohash::BuildNoHashHasher::default());
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if !seen.insert(node) {
                continue;
            }
            for (a,b) in pairs {
                if *a == node && !seen.contains(b) {stack.push(*b)}
                if *b == node && !seen.contains(a) {stack.push(*a)}
            }
        }
        seen
    }

    #[test]
    fn test_unite_and_same() {
        let mut set = DisjointSet::new(6);
        assert_eq!(set.len(),6);
        assert!(set.unite(0,1));
        assert!(set.unite(2,3));
        assert!(!set.same(1,2));
        assert!(set.unite(1,3));
        assert!(!set.unite(0,2));
        assert!(set.same(0,3));
        assert_eq!(set.size(2),4);
        assert_eq!(set.size(5),1);
        assert_eq!(set.find(4),4);
    }

    #[test]
    fn test_find_is_idempotent() {
        let mut set = DisjointSet::new(64);
        for i in 1..64 {
            set.unite(i - 1,i);
        }
        for i in 0..64 {
            let root = set.find(i);
            assert_eq!(set.find(root),root);
            assert_eq!(set.find(i),root);
        }
        assert_eq!(set.size(17),64);
    }

    #[test]
    fn test_against_naive_connectivity() {
        let mut rng = rand::rng();
        for _ in 0..20 {
            let len = rng.random_range(2..60);
            let pair_count = rng.random_range(0..len*2);
            let pairs:Vec<(usize,usize)> = (0..pair_count)
                .map(|_| (rng.random_range(0..len),rng.random_range(0..len)))
                .collect();

            let mut set = DisjointSet::new(len);
            for (a,b) in pairs.iter() {
                set.unite(*a,*b);
            }

            for x in 0..len {
                let component = naive_component(&pairs,x);
                assert_eq!(set.size(x),component.len());
                for y in 0..len {
                    assert_eq!(set.same(x,y),component.contains(&y),"{x} and {y} disagree");
                }
            }
        }
    }
}
