// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Utilities for debugging parse trees

use crate::node::Node;

fn tagged(tag: &str, v: Node) -> Node {
    Node::list([Node::ident(tag), v])
}

impl Node {
    /// A tree spelling out the structure of this one. A chain of pairs
    /// is shown as `(cons car1 car2 ... tail)`, with the cars and the
    /// final cdr dumped; e.g. `'(1)` dumps as
    /// `(cons (ident "'") (int 1) (nil))`.
    pub fn dump(&self) -> Node {
        match self {
            Node::Nil => Node::list([Node::ident("nil")]),
            Node::BoolLit(b) => tagged("bool", Node::BoolLit(*b)),
            Node::IntLit(n) => tagged("int", Node::IntLit(n.clone())),
            Node::StringLit(s) => tagged("string", Node::StringLit(s.clone())),
            Node::Ident(s) => tagged("ident", Node::StringLit(s.clone())),
            Node::Cons(..) => {
                let mut items = vec![Node::ident("cons")];
                let mut node = self;
                while let Node::Cons(car, cdr) = node {
                    items.push(car.dump());
                    node = &**cdr;
                }
                items.push(node.dump());
                Node::list(items)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::node::Node;

    #[test]
    fn dump_shows_pairs() {
        let n = Node::cons(Node::int(1), Node::int(2));
        assert_eq!(n.dump().to_string(), "(cons (int 1) (int 2))");
        let q = Node::quote(Node::list([Node::int(1)]));
        assert_eq!(q.dump().to_string(), r#"(cons (ident "'") (int 1) (nil))"#);
        let l = Node::list([Node::list([Node::int(1)]), Node::int(2)]);
        assert_eq!(l.dump().to_string(), "(cons (cons (int 1) (nil)) (int 2) (nil))");
        assert_eq!(Node::string("a b").dump().to_string(), r#"(string "a b")"#);
        assert_eq!(Node::BoolLit(false).dump().to_string(), "(bool #f)");
    }

    #[test]
    fn dump_of_long_list() {
        let n = 200_000;
        let l = Node::list((0..n).map(|_| Node::int(0)));
        let s = l.dump().to_string();
        assert!(s.starts_with("(cons (int 0) (int 0) "));
        assert!(s.ends_with(" (int 0) (nil))"));
        assert_eq!(s.len(), "(cons".len() + n * " (int 0)".len() + " (nil))".len());
    }
}
