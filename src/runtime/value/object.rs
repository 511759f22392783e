use std::{
    fmt::{self, Display},
    rc::Rc,
};

use crate::{
    ast::{ClassDecl, MemberKind, Scope},
    runtime::value::Value,
};

/// Metadata about a field declared by a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub name:      String,
    pub scope:     Scope,
    pub is_static: bool,
}

/// The class tag of an object: its name, its parent and its declared fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    pub name:   String,
    pub parent: Option<Rc<ClassInfo>>,
    pub fields: Vec<FieldInfo>,
}

impl ClassInfo {
    /// The name of the class of objects created from maps and object
    /// initializers.
    pub const ANONYMOUS_NAME: &'static str = "object";

    #[must_use]
    pub const fn new(name: String, parent: Option<Rc<Self>>, fields: Vec<FieldInfo>) -> Self {
        Self { name,
               parent,
               fields }
    }

    #[must_use]
    pub fn anonymous() -> Rc<Self> {
        Rc::new(Self::new(Self::ANONYMOUS_NAME.to_string(), None, Vec::new()))
    }

    /// Builds the metadata of a declared class.
    ///
    /// # Example
    /// ```
    /// use addyscript::{ast::StatementKind, runtime::value::ClassInfo};
    ///
    /// let source = "class Point { public x; private y = 2; }";
    /// let program = addyscript::parse(source, "point.add").unwrap();
    /// let StatementKind::Class(declaration) = &program.statements[0].kind else { unreachable!() };
    /// let class = ClassInfo::from_declaration(declaration, None);
    /// assert_eq!(class.fields.len(), 2);
    /// assert!(class.field("y").is_some());
    /// ```
    #[must_use]
    pub fn from_declaration(declaration: &ClassDecl, parent: Option<Rc<Self>>) -> Self {
        let fields = declaration.members
                                .iter()
                                .filter(|member| matches!(member.kind, MemberKind::Field { .. }))
                                .map(|member| FieldInfo { name:      member.name.clone(),
                                                          scope:     member.scope,
                                                          is_static: member.is_static(), })
                                .collect();
        Self::new(declaration.name.clone(), parent, fields)
    }

    /// Looks a field up in this class, then in its ancestors.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .or_else(|| self.parent.as_deref().and_then(|parent| parent.field(name)))
    }

    /// Whether `name` is this class or one of its ancestors.
    #[must_use]
    pub fn inherits(&self, name: &str) -> bool {
        self.name == name || self.parent.as_deref().is_some_and(|parent| parent.inherits(name))
    }
}

/// An instance of a class: a class tag and its fields, in declaration order.
#[derive(Debug, Clone)]
pub struct Object {
    class:  Rc<ClassInfo>,
    fields: Vec<(String, Value)>,
}

impl Object {
    #[must_use]
    pub const fn new(class: Rc<ClassInfo>) -> Self {
        Self { class,
               fields: Vec::new() }
    }

    #[must_use]
    pub fn class(&self) -> &ClassInfo {
        &self.class
    }

    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Sets a field, adding it after the existing ones when missing.
    pub fn set_field(&mut self, name: &str, value: Value) {
        match self.fields.iter_mut().find(|(field, _)| field == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Whether a field shows up in the textual form of the object.
    ///
    /// Fields missing from the class metadata were added dynamically and are
    /// public.
    fn is_public(&self, name: &str) -> bool {
        self.class.field(name).is_none_or(|field| field.scope == Scope::Public)
    }

    /// A copy whose field values are themselves deeply cloned.
    #[must_use]
    pub fn deep_clone(&self) -> Self {
        Self { class:  Rc::clone(&self.class),
               fields: self.fields
                           .iter()
                           .map(|(name, value)| (name.clone(), value.deep_clone()))
                           .collect(), }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {{", self.class.name)?;
        let visible = self.fields.iter().filter(|(name, _)| self.is_public(name));
        for (index, (name, value)) in visible.enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name} = {value}")?;
        }
        f.write_str("}>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_class() -> Rc<ClassInfo> {
        let field = |name: &str, scope| FieldInfo { name: name.to_string(),
                                                    scope,
                                                    is_static: false };
        let base =
            Rc::new(ClassInfo::new("Shape".to_string(), None, vec![field("id", Scope::Private)]));
        Rc::new(ClassInfo::new("Point".to_string(), Some(base), vec![field("x", Scope::Public)]))
    }

    #[test]
    fn private_fields_are_hidden() {
        let mut point = Object::new(point_class());
        point.set_field("id", Value::Integer(7));
        point.set_field("x", Value::Integer(1));
        point.set_field("extra", Value::from("yes"));
        assert_eq!(point.to_string(), "<Point {x = 1, extra = yes}>");
        assert_eq!(point.get_field("id"), Some(&Value::Integer(7)));
    }

    #[test]
    fn classes_know_their_ancestors() {
        let class = point_class();
        assert!(class.inherits("Shape"));
        assert!(!class.inherits("Circle"));
        assert_eq!(class.field("id").map(|field| field.scope), Some(Scope::Private));
    }

    #[test]
    fn deep_clone_detaches_containers() {
        let mut original = Object::new(ClassInfo::anonymous());
        original.set_field("items", Value::list(vec![Value::Integer(1)]));
        let copy = original.deep_clone();
        if let Some(Value::List(items)) = original.get_field("items") {
            items.borrow_mut().push(Value::Integer(2));
        }
        assert_eq!(copy.to_string(), "<object {items = [1]}>");
        assert_eq!(original.to_string(), "<object {items = [1, 2]}>");
    }
}
