//! Testing utilities for parse results and derivation trees
//!
//! Checking a tree by hand means matching on every variant at every level. The fluent
//! assertions here walk the tree for you and report the path of the node that failed:
//!
//! ```rust-example
//! use svo::svo::testing::assert_parse;
//!
//! let result = parser.parse("El perro y Juan corren.");
//! assert_parse(&result)
//!     .accepted()
//!     .tree(|s| {
//!         s.label("S")
//!             .child(0, |np| {
//!                 np.label("NP")
//!                     .child_labels(&["NP", "Conj", "NP"])
//!                     .child(1, |conj| conj.leaf(Category::Conjunction, "y"));
//!             })
//!             .child(1, |vp| {
//!                 vp.bracket("VP(V:corren)");
//!             });
//!     });
//! ```

use crate::svo::formats::to_bracket_str;
use crate::svo::lexicon::Category;
use crate::svo::parsing::ParseResult;
use crate::svo::tree::DerivationNode;

/// Create an assertion builder for a parse result
pub fn assert_parse(result: &ParseResult) -> ParseAssertion<'_> {
    ParseAssertion { result }
}

/// Create an assertion builder for a tree
pub fn assert_tree(tree: &DerivationNode) -> TreeAssertion<'_> {
    TreeAssertion {
        node: tree,
        context: tree.label().to_string(),
    }
}

pub struct ParseAssertion<'a> {
    result: &'a ParseResult,
}

impl<'a> ParseAssertion<'a> {
    pub fn accepted(self) -> Self {
        assert!(
            self.result.accepted,
            "Expected sentence {:?} to be accepted (consumed {}/{})",
            self.token_texts(),
            self.result.consumed,
            self.result.total()
        );
        self
    }

    /// Assert rejection, which also means no tree
    pub fn rejected(self) -> Self {
        assert!(
            !self.result.accepted,
            "Expected sentence {:?} to be rejected",
            self.token_texts()
        );
        assert!(
            self.result.tree.is_none(),
            "Rejected sentence must not carry a tree"
        );
        self
    }

    pub fn tokens(self, expected: &[&str]) -> Self {
        assert_eq!(self.token_texts(), expected, "Token mismatch");
        self
    }

    pub fn consumed(self, expected: usize) -> Self {
        assert_eq!(
            self.result.consumed, expected,
            "Expected {} consumed tokens, found {}",
            expected, self.result.consumed
        );
        self
    }

    /// Assert on the tree of an accepted sentence
    pub fn tree<F>(self, assertion: F) -> Self
    where
        F: FnOnce(TreeAssertion<'a>),
    {
        let tree = self
            .result
            .tree
            .as_ref()
            .unwrap_or_else(|| panic!("Expected a tree for {:?}", self.token_texts()));
        assertion(assert_tree(tree));
        self
    }

    fn token_texts(&self) -> Vec<&str> {
        self.result.tokens.iter().map(|t| t.as_str()).collect()
    }
}

pub struct TreeAssertion<'a> {
    node: &'a DerivationNode,
    context: String,
}

impl<'a> TreeAssertion<'a> {
    /// Assert the short label (`S`, `NP`, `Det`, ...)
    pub fn label(self, expected: &str) -> Self {
        assert_eq!(
            self.node.label(),
            expected,
            "{}: expected label {}, found {}",
            self.context,
            expected,
            self.node.label()
        );
        self
    }

    /// Assert the node is a leaf of `category` over `text`
    pub fn leaf(self, category: Category, text: &str) -> Self {
        match self.node {
            DerivationNode::Leaf {
                category: actual,
                text: actual_text,
            } => {
                assert_eq!(*actual, category, "{}: category mismatch", self.context);
                assert_eq!(actual_text, text, "{}: text mismatch", self.context);
            }
            DerivationNode::Node { .. } => panic!(
                "{}: expected leaf {}:{}, found node {}",
                self.context,
                category.tag(),
                text,
                to_bracket_str(self.node)
            ),
        }
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.node.children().len();
        assert_eq!(
            actual,
            expected,
            "{}: expected {} children, found {} [{}]",
            self.context,
            expected,
            actual,
            self.child_summary()
        );
        self
    }

    /// Assert the labels of all children, in order
    pub fn child_labels(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.node.children().iter().map(|c| c.label()).collect();
        assert_eq!(actual, expected, "{}: child labels mismatch", self.context);
        self
    }

    /// Assert on a specific child by index
    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(TreeAssertion<'a>),
    {
        let children = self.node.children();
        assert!(
            index < children.len(),
            "{}: child index {} out of bounds (node has {} children)",
            self.context,
            index,
            children.len()
        );
        let child = &children[index];
        assertion(TreeAssertion {
            node: child,
            context: format!("{}[{}]:{}", self.context, index, child.label()),
        });
        self
    }

    /// Assert the words covered by the node
    pub fn words(self, expected: &[&str]) -> Self {
        assert_eq!(self.node.words(), expected, "{}: words mismatch", self.context);
        self
    }

    /// Assert the whole subtree in bracket notation
    pub fn bracket(self, expected: &str) -> Self {
        assert_eq!(
            to_bracket_str(self.node),
            expected,
            "{}: subtree mismatch",
            self.context
        );
        self
    }

    fn child_summary(&self) -> String {
        self.node
            .children()
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
