/// The `Value` enum, its `Kind` tag and the `Shared` cell behind containers.
///
/// Also implements the structural `PartialEq`/`Hash` pair used to store values
/// as table keys, and the textual form of every kind.
pub mod core;
/// Insertion ordered hash tables backing maps and sets.
pub mod table;
/// Coercion views (`as_int32`, `as_double`, ...) and kind conversion.
///
/// # Responsibilities
/// - Implements one view per target representation, failing with
///   `ValueError::InvalidCoercion` when the kind has no such view.
/// - Decides whether an operand has to be promoted before a binary operation.
/// - Parses the date formats shared by date literals and string conversion.
pub mod coercion;
/// Operator dispatch.
///
/// # Responsibilities
/// - Promotes the left operand, then dispatches on its kind.
/// - Provides the shared fallback for equality and identity.
/// - Implements script equality and ordering, which never fail.
pub mod ops;
/// Operators of the numeric kinds, booleans and dates.
pub mod numeric;
/// Operators of strings and containers.
pub mod containers;
/// Properties, items and slices.
pub mod access;
/// Iteration over `(key, value)` pairs.
pub mod iteration;
/// Class metadata and script objects.
pub mod object;
/// Host objects wrapped as resources, and the compatibility ranking.
pub mod resource;
/// Functions captured as values.
pub mod closure;
/// Conversions between values and host data.
pub mod factory;

pub use self::{
    closure::Closure,
    core::{Kind, Shared, Value, next_serial_id},
    factory::{HostType, HostValue},
    iteration::Entries,
    object::{ClassInfo, FieldInfo, Object},
    resource::{Compatibility, HostMember, HostObject, Resource, compatibility},
    table::Table,
};
