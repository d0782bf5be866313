use bincode::{
    de::Decoder,
    enc::Encoder,
    error::{DecodeError, EncodeError},
    Decode, Encode,
};
use hashbrown::HashMap;

/// Maximum number of children stored in a sorted array.
/// A node exceeding this number switches to a hash map.
const ARRAY_LENGTH_LIMIT: usize = 3;

enum Children {
    Array(Vec<Node>),
    Map(HashMap<char, Node>),
}

impl Default for Children {
    fn default() -> Self {
        Self::Array(Vec::new())
    }
}

/// Node of [`Trie`].
#[derive(Default)]
pub struct Node {
    ch: char,
    word_end: bool,
    children: Children,
}

impl Node {
    fn new(ch: char) -> Self {
        Self {
            ch,
            word_end: false,
            children: Children::default(),
        }
    }

    #[inline(always)]
    fn num_children(&self) -> usize {
        match &self.children {
            Children::Array(nodes) => nodes.len(),
            Children::Map(nodes) => nodes.len(),
        }
    }

    #[inline(always)]
    fn has_children(&self) -> bool {
        self.num_children() != 0
    }

    #[inline(always)]
    fn child(&self, c: char) -> Option<&Self> {
        match &self.children {
            Children::Array(nodes) => nodes
                .binary_search_by_key(&c, |n| n.ch)
                .ok()
                .map(|i| &nodes[i]),
            Children::Map(nodes) => nodes.get(&c),
        }
    }

    fn child_mut(&mut self, c: char) -> Option<&mut Self> {
        match &mut self.children {
            Children::Array(nodes) => match nodes.binary_search_by_key(&c, |n| n.ch) {
                Ok(i) => Some(&mut nodes[i]),
                Err(_) => None,
            },
            Children::Map(nodes) => nodes.get_mut(&c),
        }
    }

    fn child_or_insert(&mut self, c: char) -> &mut Self {
        let promote = match &self.children {
            Children::Array(nodes) => {
                nodes.len() >= ARRAY_LENGTH_LIMIT
                    && nodes.binary_search_by_key(&c, |n| n.ch).is_err()
            }
            Children::Map(_) => false,
        };
        if promote {
            self.promote();
        }
        match &mut self.children {
            Children::Array(nodes) => {
                let i = match nodes.binary_search_by_key(&c, |n| n.ch) {
                    Ok(i) => i,
                    Err(i) => {
                        nodes.insert(i, Self::new(c));
                        i
                    }
                };
                &mut nodes[i]
            }
            Children::Map(nodes) => nodes.entry(c).or_insert_with(|| Self::new(c)),
        }
    }

    /// Moves the children from the array into a hash map. Never reverted.
    fn promote(&mut self) {
        let old = std::mem::replace(
            &mut self.children,
            Children::Map(HashMap::with_capacity(ARRAY_LENGTH_LIMIT * 2)),
        );
        if let (Children::Array(nodes), Children::Map(map)) = (old, &mut self.children) {
            map.extend(nodes.into_iter().map(|n| (n.ch, n)));
        }
    }

    #[cfg(test)]
    pub(crate) const fn is_map(&self) -> bool {
        matches!(self.children, Children::Map(_))
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("ch", &self.ch)
            .field("word_end", &self.word_end)
            .field("num_children", &self.num_children())
            .finish()
    }
}

impl Encode for Node {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), EncodeError> {
        Encode::encode(&self.ch, encoder)?;
        Encode::encode(&self.word_end, encoder)?;
        let mut children: Vec<&Self> = match &self.children {
            Children::Array(nodes) => nodes.iter().collect(),
            Children::Map(nodes) => nodes.values().collect(),
        };
        // Sorted so that the image does not depend on the hash order.
        children.sort_unstable_by_key(|n| n.ch);
        Encode::encode(&(children.len() as u64), encoder)?;
        for child in children {
            Encode::encode(child, encoder)?;
        }
        Ok(())
    }
}

impl Decode for Node {
    fn decode<D: Decoder>(decoder: &mut D) -> Result<Self, DecodeError> {
        let ch: char = Decode::decode(decoder)?;
        let word_end = Decode::decode(decoder)?;
        let len: u64 = Decode::decode(decoder)?;
        let mut nodes = Vec::new();
        for _ in 0..len {
            nodes.push(Self::decode(decoder)?);
        }
        if nodes.windows(2).any(|w| w[0].ch >= w[1].ch) {
            return Err(DecodeError::OtherString(format!(
                "children of {ch:?} are not sorted in strictly ascending order"
            )));
        }
        let children = if nodes.len() <= ARRAY_LENGTH_LIMIT {
            Children::Array(nodes)
        } else {
            Children::Map(nodes.into_iter().map(|n| (n.ch, n)).collect())
        };
        Ok(Self {
            ch,
            word_end,
            children,
        })
    }
}

bincode::impl_borrow_decode!(Node);

/// Result of matching characters against a [`Trie`].
///
/// A hit can be a complete word and a prefix of longer words at the same time.
/// While it is a prefix, it remembers the node reached so that the matching
/// can be continued one character at a time.
#[derive(Clone, Copy, Debug)]
pub struct Hit<'a> {
    matched: bool,
    prefix: bool,
    beg: usize,
    end: usize,
    node: Option<&'a Node>,
}

impl<'a> Hit<'a> {
    #[inline(always)]
    const fn new(beg: usize) -> Self {
        Self {
            matched: false,
            prefix: false,
            beg,
            end: beg,
            node: None,
        }
    }

    /// Checks if the characters matched so far form a complete word.
    #[inline(always)]
    pub const fn is_match(&self) -> bool {
        self.matched
    }

    /// Checks if the characters matched so far are a prefix of a longer word.
    #[inline(always)]
    pub const fn is_prefix(&self) -> bool {
        self.prefix
    }

    /// Checks if neither a word nor a prefix was found.
    #[inline(always)]
    pub const fn is_unmatch(&self) -> bool {
        !self.matched && !self.prefix
    }

    /// Gets the position of the first matched character.
    #[inline(always)]
    pub const fn beg(&self) -> usize {
        self.beg
    }

    /// Gets the position of the last examined character.
    #[inline(always)]
    pub const fn end(&self) -> usize {
        self.end
    }

    #[inline(always)]
    fn settle(&mut self, node: &'a Node) {
        self.matched = node.word_end;
        if node.has_children() {
            self.prefix = true;
            self.node = Some(node);
        }
    }
}

/// Prefix tree of words.
///
/// Each node keeps up to three children in a sorted array and
/// switches to a hash map once it has more.
#[derive(Default, Debug)]
pub struct Trie {
    root: Node,
    num_words: usize,
}

impl Encode for Trie {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), EncodeError> {
        Encode::encode(&self.root, encoder)?;
        Encode::encode(&(self.num_words as u64), encoder)?;
        Ok(())
    }
}

impl Decode for Trie {
    fn decode<D: Decoder>(decoder: &mut D) -> Result<Self, DecodeError> {
        let root = Decode::decode(decoder)?;
        let num_words: u64 = Decode::decode(decoder)?;
        let num_words = usize::try_from(num_words).map_err(|_| {
            DecodeError::OtherString(format!("num_words is too large: {num_words}"))
        })?;
        Ok(Self { root, num_words })
    }
}

bincode::impl_borrow_decode!(Trie);

impl Trie {
    /// Creates an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the number of words registered.
    #[inline(always)]
    pub const fn num_words(&self) -> usize {
        self.num_words
    }

    /// Checks if no word is registered.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.num_words == 0
    }

    /// Registers a word. Empty words are ignored.
    pub fn insert<I>(&mut self, word: I)
    where
        I: IntoIterator<Item = char>,
    {
        let mut node = &mut self.root;
        let mut depth = 0;
        for c in word {
            node = node.child_or_insert(c);
            depth += 1;
        }
        if depth != 0 && !node.word_end {
            node.word_end = true;
            self.num_words += 1;
        }
    }

    /// Unregisters a word while keeping the nodes for longer words.
    ///
    /// Returns `true` if the word was registered.
    pub fn disable<I>(&mut self, word: I) -> bool
    where
        I: IntoIterator<Item = char>,
    {
        let mut node = &mut self.root;
        let mut depth = 0;
        for c in word {
            match node.child_mut(c) {
                Some(n) => node = n,
                None => return false,
            }
            depth += 1;
        }
        if depth != 0 && node.word_end {
            node.word_end = false;
            self.num_words -= 1;
            true
        } else {
            false
        }
    }

    /// Checks if the word is registered.
    pub fn contains(&self, word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        self.match_at(&chars, 0, chars.len()).is_match()
    }

    /// Matches `chars[begin..begin + length]` from the root.
    ///
    /// # Panics
    ///
    /// It will panic when the range is out of `chars`.
    pub fn match_at(&self, chars: &[char], begin: usize, length: usize) -> Hit<'_> {
        let mut hit = Hit::new(begin);
        if length == 0 {
            return hit;
        }
        let mut node = &self.root;
        for (i, &c) in chars[begin..begin + length].iter().enumerate() {
            hit.end = begin + i;
            match node.child(c) {
                Some(n) => node = n,
                None => return hit,
            }
        }
        hit.settle(node);
        hit
    }

    /// Continues the matching of `hit` with the character at `pos`.
    ///
    /// The state of `hit` is reset before matching, so the returned hit
    /// only tells whether `chars[hit.beg()..=pos]` is a word or a prefix.
    pub fn continue_match<'a>(&'a self, mut hit: Hit<'a>, chars: &[char], pos: usize) -> Hit<'a> {
        let from = hit.node.take();
        hit.matched = false;
        hit.prefix = false;
        hit.end = pos;
        if let Some(node) = from.and_then(|n| n.child(chars[pos])) {
            hit.settle(node);
        }
        hit
    }
}
