//! Typed arena that addresses its values through stable, copyable entries.

use std::mem;
use std::ops::{Index, IndexMut};

/// A struct representing a handle to a value stored in an `Arena<T>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Entry {
    index: usize,
}

enum Block<T> {
    Occupied(T),
    Vacant(Option<Entry>),
}

/// A fast, but limited allocator that only allocates a single type of object.
///
/// All objects inside the arena are destroyed when the arena is destroyed. The arena supports
/// deallocation of individual objects and yields both mutable and immutable references to them.
/// The underlying container is simply a `Vec` of blocks threaded with a free list, so the code
/// itself is very simple and uses no unsafe code. An `Entry` stays valid until the object behind
/// it is freed, no matter how many other objects are allocated or freed in between.
///
/// # Examples
///
/// ```
/// use ordered_collections::arena::Arena;
///
/// let mut arena = Arena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// ```
pub struct Arena<T> {
    head: Option<Entry>,
    blocks: Vec<Block<T>>,
    len: usize,
}

impl<T> Arena<T> {
    fn is_valid_entry(&self, entry: Entry) -> bool {
        entry.index < self.blocks.len()
    }

    /// Constructs a new, empty `Arena<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::new();
    /// ```
    pub fn new() -> Self {
        Arena {
            head: None,
            blocks: Vec::new(),
            len: 0,
        }
    }

    /// Constructs a new, empty `Arena<T>` with space for `capacity` objects before the underlying
    /// storage reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::with_capacity(1024);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            head: None,
            blocks: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Allocates an object in the arena and returns an `Entry` to it. The entry can later be used
    /// to retrieve mutable and immutable references to the object, and to deallocate it. Vacated
    /// blocks are reused before the arena grows.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// ```
    pub fn allocate(&mut self, value: T) -> Entry {
        self.len += 1;
        match self.head.take() {
            None => {
                self.blocks.push(Block::Occupied(value));
                Entry {
                    index: self.blocks.len() - 1,
                }
            },
            Some(entry) => {
                let vacant_block =
                    mem::replace(&mut self.blocks[entry.index], Block::Occupied(value));
                match vacant_block {
                    Block::Vacant(next_entry) => {
                        self.head = next_entry;
                        entry
                    },
                    Block::Occupied(_) => panic!("Expected a vacant block."),
                }
            },
        }
    }

    /// Deallocates the object behind `entry` and returns it. The vacated block goes to the front
    /// of the free list.
    ///
    /// # Panics
    ///
    /// Panics if `entry` corresponds to an invalid or vacant block.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// ```
    pub fn free(&mut self, entry: Entry) -> T {
        if !self.is_valid_entry(entry) {
            panic!("Error: attempting to free invalid block.");
        }
        let old_block = mem::replace(
            &mut self.blocks[entry.index],
            Block::Vacant(self.head.take()),
        );
        match old_block {
            Block::Vacant(_) => panic!("Error: attempting to free vacant block."),
            Block::Occupied(value) => {
                self.len -= 1;
                self.head = Some(entry);
                value
            },
        }
    }

    /// Returns an immutable reference to the object behind `entry`. Returns `None` if the entry
    /// does not correspond to a valid object.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn get(&self, entry: Entry) -> Option<&T> {
        if !self.is_valid_entry(entry) {
            return None;
        }
        match self.blocks[entry.index] {
            Block::Occupied(ref value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to the object behind `entry`. Returns `None` if the entry does
    /// not correspond to a valid object.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get_mut(x), Some(&mut 0));
    /// ```
    pub fn get_mut(&mut self, entry: Entry) -> Option<&mut T> {
        if !self.is_valid_entry(entry) {
            return None;
        }
        match self.blocks[entry.index] {
            Block::Occupied(ref mut value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns the number of objects currently allocated in the arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// arena.allocate(0);
    /// assert_eq!(arena.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no objects are currently allocated in the arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::new();
    /// assert!(arena.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the arena, dropping all allocated objects and invalidating every previously
    /// returned entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// arena.allocate(0);
    /// arena.clear();
    /// assert!(arena.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.head = None;
        self.blocks.clear();
        self.len = 0;
    }
}

impl<T> Index<Entry> for Arena<T> {
    type Output = T;

    fn index(&self, entry: Entry) -> &Self::Output {
        self.get(entry).expect("Error: entry out of bounds.")
    }
}

impl<T> IndexMut<Entry> for Arena<T> {
    fn index_mut(&mut self, entry: Entry) -> &mut Self::Output {
        self.get_mut(entry).expect("Error: entry out of bounds.")
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}
