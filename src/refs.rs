use pdf_writer::Ref;

/// Hands out PDF object ids in increasing order
pub(crate) struct RefAllocator {
    next_id: i32,
}

impl RefAllocator {
    pub fn new() -> RefAllocator {
        RefAllocator { next_id: 1 }
    }

    pub fn bump(&mut self) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        id
    }
}

/// The objects that make up one embedded font
pub(crate) struct FontRefs {
    pub type0: Ref,
    pub cid: Ref,
    pub descriptor: Ref,
    pub data: Ref,
    pub to_unicode: Ref,
    /// Only written when the whole program is embedded
    pub cid_to_gid: Ref,
}

impl FontRefs {
    pub fn allocate(refs: &mut RefAllocator) -> FontRefs {
        FontRefs {
            type0: refs.bump(),
            cid: refs.bump(),
            descriptor: refs.bump(),
            data: refs.bump(),
            to_unicode: refs.bump(),
            cid_to_gid: refs.bump(),
        }
    }
}

/// The objects that make up one page
pub(crate) struct PageRefs {
    pub page: Ref,
    pub content: Ref,
}

impl PageRefs {
    pub fn allocate(refs: &mut RefAllocator) -> PageRefs {
        PageRefs {
            page: refs.bump(),
            content: refs.bump(),
        }
    }
}
