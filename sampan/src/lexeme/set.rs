use crate::lexeme::Lexeme;

/// Index of a cell in [`LexemeSet`].
pub(crate) type CellId = usize;

#[derive(Clone, Debug)]
struct Cell {
    lexeme: Lexeme,
    prev: Option<CellId>,
    next: Option<CellId>,
}

/// Sorted set of lexemes implemented as a doubly-linked list on a vector.
///
/// Lexemes mostly arrive in ascending order, so insertion checks the tail and
/// the head before walking back from the tail.
#[derive(Clone, Default, Debug)]
pub(crate) struct LexemeSet {
    cells: Vec<Cell>,
    vacant: Vec<CellId>,
    head: Option<CellId>,
    tail: Option<CellId>,
    len: usize,
}

impl LexemeSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn clear(&mut self) {
        self.cells.clear();
        self.vacant.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    fn alloc(&mut self, lexeme: Lexeme) -> CellId {
        let cell = Cell {
            lexeme,
            prev: None,
            next: None,
        };
        if let Some(id) = self.vacant.pop() {
            self.cells[id] = cell;
            id
        } else {
            self.cells.push(cell);
            self.cells.len() - 1
        }
    }

    fn link_after(&mut self, prev: Option<CellId>, id: CellId) {
        let next = match prev {
            Some(p) => self.cells[p].next.replace(id),
            None => self.head.replace(id),
        };
        self.cells[id].prev = prev;
        self.cells[id].next = next;
        match next {
            Some(n) => self.cells[n].prev = Some(id),
            None => self.tail = Some(id),
        }
        self.len += 1;
    }

    fn unlink(&mut self, id: CellId) -> Lexeme {
        let Cell { prev, next, .. } = self.cells[id];
        match prev {
            Some(p) => self.cells[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.cells[n].prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;
        self.vacant.push(id);
        std::mem::take(&mut self.cells[id].lexeme)
    }

    /// Inserts a lexeme keeping the order.
    ///
    /// Returns `false` if an equal lexeme is already stored.
    pub(crate) fn insert(&mut self, lexeme: Lexeme) -> bool {
        let (Some(head), Some(tail)) = (self.head, self.tail) else {
            let id = self.alloc(lexeme);
            self.link_after(None, id);
            return true;
        };
        let tail_lexeme = &self.cells[tail].lexeme;
        if *tail_lexeme == lexeme {
            return false;
        }
        if *tail_lexeme < lexeme {
            let id = self.alloc(lexeme);
            self.link_after(Some(tail), id);
            return true;
        }
        if self.cells[head].lexeme > lexeme {
            let id = self.alloc(lexeme);
            self.link_after(None, id);
            return true;
        }
        // head <= lexeme < tail
        let mut prev = self.cells[tail].prev;
        while let Some(p) = prev {
            let l = &self.cells[p].lexeme;
            if *l == lexeme {
                return false;
            }
            if *l < lexeme {
                break;
            }
            prev = self.cells[p].prev;
        }
        let id = self.alloc(lexeme);
        self.link_after(prev, id);
        true
    }

    #[inline(always)]
    pub(crate) fn first(&self) -> Option<&Lexeme> {
        self.head.map(|id| &self.cells[id].lexeme)
    }

    #[inline(always)]
    pub(crate) fn last(&self) -> Option<&Lexeme> {
        self.tail.map(|id| &self.cells[id].lexeme)
    }

    pub(crate) fn pop_first(&mut self) -> Option<Lexeme> {
        let id = self.head?;
        let lexeme = self.unlink(id);
        if self.is_empty() {
            self.clear();
        }
        Some(lexeme)
    }

    pub(crate) fn pop_last(&mut self) -> Option<Lexeme> {
        let id = self.tail?;
        let lexeme = self.unlink(id);
        if self.is_empty() {
            self.clear();
        }
        Some(lexeme)
    }

    /// Gets the id of the first cell.
    #[inline(always)]
    pub(crate) const fn head(&self) -> Option<CellId> {
        self.head
    }

    /// Gets the id of the cell following `id`.
    #[inline(always)]
    pub(crate) fn next_of(&self, id: CellId) -> Option<CellId> {
        self.cells[id].next
    }

    #[inline(always)]
    pub(crate) fn get(&self, id: CellId) -> &Lexeme {
        &self.cells[id].lexeme
    }

    pub(crate) fn iter(&self) -> Iter<'_> {
        Iter {
            set: self,
            cur: self.head,
        }
    }
}

/// Iterator over a [`LexemeSet`] in ascending order.
pub(crate) struct Iter<'a> {
    set: &'a LexemeSet,
    cur: Option<CellId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Lexeme;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cur?;
        self.cur = self.set.next_of(id);
        Some(self.set.get(id))
    }
}
