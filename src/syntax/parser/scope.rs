use std::collections::BTreeMap;

use crate::{
    ast::{Modifier, QualifiedName, Statement},
    error::{Message, ParseResult},
    syntax::{parser::Parser, span::Span},
};

/// The name of the function standing for the script body.
pub const MAIN_FUNCTION_NAME: &str = "main";
/// The name of the method making a class iterable.
pub const ITERATOR_FUNCTION_NAME: &str = "iterator";
/// The name given to the key of a `foreach` loop that declares none.
pub const DEFAULT_KEY_NAME: &str = "__key";

/// The class being parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFrame {
    pub name:     String,
    pub modifier: Modifier,
    pub parent:   Option<QualifiedName>,
}

/// The labels and gotos of a block.
#[derive(Debug, Clone, Default)]
struct BlockFrame {
    /// Whether the value of the block is given by `yield`.
    as_expression: bool,
    /// Each label with the offset where it ends.
    labels:        Vec<(String, usize, Span)>,
    /// The gotos whose label was not found yet.
    gotos:         Vec<(String, Span)>,
}

/// The function being parsed.
#[derive(Debug, Clone)]
pub struct FunctionFrame {
    /// Missing for lambdas.
    pub name:           Option<String>,
    pub is_method:      bool,
    pub is_constructor: bool,
    pub is_static:      bool,
    /// The number of loops around the current statement.
    pub loops:          usize,
    /// The number of switches around the current statement.
    pub switches:       usize,
    /// The number of finally blocks around the current statement.
    pub finally_blocks: usize,
    /// Collects the gotos leaving the body.
    root:               BlockFrame,
    blocks:             Vec<BlockFrame>,
}

impl FunctionFrame {
    fn new(name: Option<String>, is_method: bool, is_static: bool) -> Self {
        Self { name,
               is_method,
               is_constructor: false,
               is_static,
               loops: 0,
               switches: 0,
               finally_blocks: 0,
               root: BlockFrame::default(),
               blocks: Vec::new() }
    }

    /// The script body.
    #[must_use]
    pub fn main() -> Self {
        Self::new(Some(MAIN_FUNCTION_NAME.to_string()), false, false)
    }

    /// A function declared outside of any class.
    #[must_use]
    pub fn function(name: impl Into<String>) -> Self {
        Self::new(Some(name.into()), false, false)
    }

    #[must_use]
    pub fn method(name: impl Into<String>, is_static: bool) -> Self {
        Self::new(Some(name.into()), true, is_static)
    }

    #[must_use]
    pub fn constructor() -> Self {
        Self { is_constructor: true,
               ..Self::new(Some("constructor".to_string()), true, false) }
    }

    /// A lambda or an inline function, which sees `this` when its enclosing
    /// function does.
    #[must_use]
    pub fn lambda(enclosing: &Self) -> Self {
        Self::new(None, enclosing.is_method, enclosing.is_static)
    }

    #[must_use]
    pub fn is_main(&self) -> bool {
        !self.is_method && self.name.as_deref() == Some(MAIN_FUNCTION_NAME)
    }

    /// Whether this is the `iterator` method of a class, where `yield` is
    /// allowed.
    #[must_use]
    pub fn is_iterator(&self) -> bool {
        self.is_method
        && !self.is_constructor
        && !self.is_static
        && self.name.as_deref() == Some(ITERATOR_FUNCTION_NAME)
    }

    fn block_mut(&mut self) -> &mut BlockFrame {
        match self.blocks.last_mut() {
            Some(block) => block,
            None => &mut self.root,
        }
    }

    fn can_yield(&self) -> bool {
        self.is_iterator() || self.blocks.iter().any(|block| block.as_expression)
    }
}

/// The nesting of classes, functions and blocks around the current token.
#[derive(Debug, Clone)]
pub struct ScopeStack {
    classes: Vec<ClassFrame>,
    main:    FunctionFrame,
    nested:  Vec<FunctionFrame>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    /// The stack at the top of a script.
    #[must_use]
    pub fn new() -> Self {
        Self { classes: Vec::new(),
               main:    FunctionFrame::main(),
               nested:  Vec::new(), }
    }

    #[must_use]
    pub fn class(&self) -> Option<&ClassFrame> {
        self.classes.last()
    }

    #[must_use]
    pub fn function(&self) -> &FunctionFrame {
        self.nested.last().unwrap_or(&self.main)
    }

    pub fn function_mut(&mut self) -> &mut FunctionFrame {
        match self.nested.last_mut() {
            Some(function) => function,
            None => &mut self.main,
        }
    }

    /// Whether `yield` is allowed at the current token.
    #[must_use]
    pub fn can_yield(&self) -> bool {
        self.function().can_yield()
    }

    /// A stack holding only the current class and function, for the parser
    /// of an embedded expression.
    #[must_use]
    pub fn context(&self) -> Self {
        let function = self.function();
        let root = BlockFrame { as_expression: function.can_yield(),
                                ..BlockFrame::default() };
        let main = FunctionFrame { root,
                                   blocks: Vec::new(),
                                   ..function.clone() };
        Self { classes: self.class().into_iter().cloned().collect(),
               main,
               nested: Vec::new() }
    }
}

/// Maps each label to the first statement starting after it.
fn resolve_labels(labels: &[(String, usize, Span)],
                  statements: &[Statement])
                  -> BTreeMap<String, usize> {
    let mut addresses = BTreeMap::new();
    let mut index = 0;
    for (name, end, _) in labels {
        while index < statements.len() && statements[index].span.start.offset < *end {
            index += 1;
        }
        addresses.insert(name.clone(), index);
    }
    addresses
}

impl<I> Parser<I> where I: Iterator<Item = char>
{
    pub(super) fn push_class(&mut self, class: ClassFrame) {
        self.scopes.classes.push(class);
    }

    pub(super) fn pop_class(&mut self) {
        self.scopes.classes.pop();
    }

    pub(super) fn push_function(&mut self, function: FunctionFrame) {
        self.scopes.nested.push(function);
    }

    /// Leaves a function.
    ///
    /// # Errors
    /// `UndeclaredLabel` for a goto whose label is nowhere in the function.
    pub(super) fn pop_function(&mut self) -> ParseResult<()> {
        if let Some(function) = self.scopes.nested.pop()
           && let Some((name, span)) = function.root.gotos.into_iter().next()
        {
            return Err(self.semantic_error(span, Message::UndeclaredLabel { name }));
        }
        Ok(())
    }

    pub(super) fn push_block(&mut self, as_expression: bool) {
        let block = BlockFrame { as_expression,
                                 ..BlockFrame::default() };
        self.scopes.function_mut().blocks.push(block);
    }

    /// Leaves a block once its statements are known.
    ///
    /// # Returns
    /// The address of each label of the block. Gotos to other labels are
    /// handed over to the enclosing block.
    pub(super) fn pop_block(&mut self, statements: &[Statement]) -> BTreeMap<String, usize> {
        self.pop_block_with(statements, BTreeMap::new())
    }

    /// Leaves a block that has extra labels, such as the sections of a
    /// switch.
    pub(super) fn pop_block_with(&mut self,
                                 statements: &[Statement],
                                 extra: BTreeMap<String, usize>)
                                 -> BTreeMap<String, usize> {
        let function = self.scopes.function_mut();
        let Some(block) = function.blocks.pop() else {
            return extra;
        };
        let mut labels = resolve_labels(&block.labels, statements);
        labels.extend(extra);
        let pending = block.gotos
                           .into_iter()
                           .filter(|(name, _)| !labels.contains_key(name));
        function.block_mut().gotos.extend(pending);
        labels
    }

    /// Resolves the labels declared at the top of the script.
    ///
    /// # Errors
    /// `UndeclaredLabel` for a goto whose label is nowhere in the script.
    pub(super) fn pop_root(&mut self,
                           statements: &[Statement])
                           -> ParseResult<BTreeMap<String, usize>> {
        let root = std::mem::take(&mut self.scopes.main.root);
        let labels = resolve_labels(&root.labels, statements);
        if let Some((name, span)) = root.gotos
                                        .into_iter()
                                        .find(|(name, _)| !labels.contains_key(name))
        {
            return Err(self.semantic_error(span, Message::UndeclaredLabel { name }));
        }
        Ok(labels)
    }

    /// Declares a label ending at `end` in the current block.
    ///
    /// # Errors
    /// `DuplicatedLabel` when the block already has a label with that name.
    pub(super) fn declare_label(&mut self,
                                name: String,
                                end: usize,
                                span: Span)
                                -> ParseResult<()> {
        let block = self.scopes.function_mut().block_mut();
        if block.labels.iter().any(|(other, ..)| *other == name) {
            return Err(self.semantic_error(span, Message::DuplicatedLabel { name }));
        }
        block.labels.push((name, end, span));
        Ok(())
    }

    pub(super) fn declare_goto(&mut self, name: String, span: Span) {
        self.scopes.function_mut().block_mut().gotos.push((name, span));
    }
}
