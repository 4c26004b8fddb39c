//! Read-only traversal over parsed pattern token trees.
//!
//! Consumers walk a tree through [`Token::accept`] without matching on
//! concrete kinds themselves: leaves dispatch to `visit_leaf`, parents
//! bracket their children between `begin_parent` and `end_parent`, and a
//! visitor can prune a subtree by returning [`VisitControl::SkipChildren`]
//! from the begin hook. Children are visited raw (noise included) in
//! source order; the traversal never mutates the tree.

use super::token::{LeafToken, ParentToken, Token};

/// Decision returned from [`TokenVisitor::begin_parent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitControl {
    /// Descend into the parent's children.
    Continue,
    /// Skip the children; `end_parent` still runs.
    SkipChildren,
}

/// Hooks invoked while walking a token tree. All methods default to
/// no-ops so a visitor only implements what it cares about.
pub trait TokenVisitor {
    fn visit_leaf(&mut self, _leaf: &LeafToken) {}

    fn begin_parent(&mut self, _parent: &ParentToken) -> VisitControl {
        VisitControl::Continue
    }

    fn end_parent(&mut self, _parent: &ParentToken) {}
}

impl Token {
    /// Walk this tree, invoking the visitor's hooks in document order.
    pub fn accept<V: TokenVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Token::Leaf(leaf) => visitor.visit_leaf(leaf),
            Token::Parent(parent) => {
                if visitor.begin_parent(parent) == VisitControl::Continue {
                    for child in parent.children() {
                        child.accept(visitor);
                    }
                }
                visitor.end_parent(parent);
            }
        }
    }

    /// Concatenated text of every leaf in document order. For trees built
    /// by the parser this reproduces the original input exactly.
    pub fn leaf_text(&self) -> String {
        struct Collector(String);
        impl TokenVisitor for Collector {
            fn visit_leaf(&mut self, leaf: &LeafToken) {
                self.0.push_str(leaf.text());
            }
        }
        let mut collector = Collector(String::new());
        self.accept(&mut collector);
        collector.0
    }
}
