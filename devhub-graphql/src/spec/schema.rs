//! The static schema served by introspection.

use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum TypeKind {
    Object,
    Scalar,
    List,
    NonNull,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Schema {
    pub(crate) query_type: NamedRef,
    pub(crate) mutation_type: NamedRef,
    pub(crate) types: Vec<FullType>,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct NamedRef {
    pub(crate) name: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct FullType {
    pub(crate) kind: TypeKind,
    pub(crate) name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) fields: Option<Vec<Field>>,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct Field {
    pub(crate) name: &'static str,
    pub(crate) args: Vec<InputValue>,
    #[serde(rename = "type")]
    pub(crate) ty: TypeRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<&'static str>,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct InputValue {
    pub(crate) name: &'static str,
    #[serde(rename = "type")]
    pub(crate) ty: TypeRef,
}

/// A reference to a named type, or a list or non-null wrapper around one.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TypeRef {
    pub(crate) kind: TypeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    fn named(kind: TypeKind, name: &'static str) -> Self {
        Self {
            kind,
            name: Some(name),
            of_type: None,
        }
    }

    fn scalar(name: &'static str) -> Self {
        Self::named(TypeKind::Scalar, name)
    }

    fn object(name: &'static str) -> Self {
        Self::named(TypeKind::Object, name)
    }

    fn wrap(kind: TypeKind, inner: TypeRef) -> Self {
        Self {
            kind,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    fn list(inner: TypeRef) -> Self {
        Self::wrap(TypeKind::List, inner)
    }

    fn non_null(inner: TypeRef) -> Self {
        Self::wrap(TypeKind::NonNull, inner)
    }
}

impl Field {
    fn new(name: &'static str, ty: TypeRef) -> Self {
        Self {
            name,
            args: Vec::new(),
            ty,
            description: None,
        }
    }

    fn arg(mut self, name: &'static str, ty: TypeRef) -> Self {
        self.args.push(InputValue { name, ty });
        self
    }

    fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

impl FullType {
    fn object(name: &'static str, fields: Vec<Field>) -> Self {
        Self {
            kind: TypeKind::Object,
            name,
            fields: Some(fields),
        }
    }

    fn scalar(name: &'static str) -> Self {
        Self {
            kind: TypeKind::Scalar,
            name,
            fields: None,
        }
    }
}

fn required_string() -> TypeRef {
    TypeRef::non_null(TypeRef::scalar("String"))
}

/// Every type of the DevHub graph, including fields no resolver exposes directly.
pub(crate) static SCHEMA: Lazy<Schema> = Lazy::new(|| Schema {
    query_type: NamedRef { name: "Query" },
    mutation_type: NamedRef { name: "Mutation" },
    types: vec![
        FullType::object(
            "Query",
            vec![
                Field::new("me", TypeRef::object("User"))
                    .description("Current authenticated user"),
                Field::new("user", TypeRef::object("User"))
                    .arg("id", required_string())
                    .description("Fetch user by ID"),
                Field::new("repos", TypeRef::list(TypeRef::object("Repo")))
                    .description("List accessible repositories"),
                Field::new("repo", TypeRef::object("Repo"))
                    .arg("id", required_string())
                    .description("Fetch repository by ID"),
            ],
        ),
        FullType::object(
            "Mutation",
            vec![
                Field::new("updateProfile", TypeRef::object("User"))
                    .arg("email", TypeRef::scalar("String"))
                    .description("Update own profile"),
                Field::new("promoteUser", TypeRef::object("User"))
                    .arg("userId", required_string())
                    .arg("role", required_string())
                    .description("Promote a user to a new role (admin only)"),
            ],
        ),
        FullType::object(
            "User",
            vec![
                Field::new("id", TypeRef::scalar("String")),
                Field::new("username", TypeRef::scalar("String")),
                Field::new("email", TypeRef::scalar("String")),
                Field::new("role", TypeRef::scalar("String")),
                Field::new("repos", TypeRef::list(TypeRef::scalar("String"))),
            ],
        ),
        FullType::object(
            "Repo",
            vec![
                Field::new("id", TypeRef::scalar("String")),
                Field::new("name", TypeRef::scalar("String")),
                Field::new("stars", TypeRef::scalar("Int")),
                Field::new("language", TypeRef::scalar("String")),
                Field::new("isPrivate", TypeRef::scalar("Boolean")),
                Field::new("flag", TypeRef::scalar("String")).description("Hidden flag field"),
            ],
        ),
        FullType::scalar("String"),
        FullType::scalar("Int"),
        FullType::scalar("Boolean"),
    ],
});

/// Field names of the object type `type_name`, in schema order.
#[cfg(test)]
pub(crate) fn field_names(type_name: &str) -> Option<Vec<&'static str>> {
    SCHEMA
        .types
        .iter()
        .find(|ty| ty.name == type_name)?
        .fields
        .as_ref()
        .map(|fields| fields.iter().map(|field| field.name).collect())
}
