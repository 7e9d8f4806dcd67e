//! Legality rules for concrete types.
//!
//! | address space     | legal access     |
//! |-------------------|------------------|
//! | function, private | read_write       |
//! | workgroup         | read_write       |
//! | uniform, handle   | read             |
//! | storage           | read, read_write |
//!
//! A `workgroup` pointer additionally needs a storable element type and
//! restricts the overload to the compute stage.

use intrindef_table::StageUses;

use crate::sem::{FullyQualifiedName, INTERNAL_PREFIX, Named, Sem};

/// Element types that cannot be declared by user code.
const ABSTRACT_TYPES: [&str; 2] = ["ia", "fa"];

/// Check a concrete type.
///
/// Returns the stages it may be used from, or `None` when it is illegal.
pub fn validate(sem: &Sem, fqn: &FullyQualifiedName) -> Option<StageUses> {
    let mut stages = StageUses::ALL;
    check(sem, fqn, &mut stages).then_some(stages)
}

fn check(sem: &Sem, fqn: &FullyQualifiedName, stages: &mut StageUses) -> bool {
    let name = sem.name_of(fqn.target);
    if name.starts_with(INTERNAL_PREFIX) {
        return false;
    }

    let args: Vec<&FullyQualifiedName> = fqn.name_args().collect();
    if matches!(fqn.target, Named::Type(_)) {
        match (name, args.as_slice()) {
            ("array", [element, ..]) if !is_storable(sem, element) => return false,
            ("ptr", [space, element, access]) => {
                let space = sem.name_of(space.target);
                if !is_legal_access(space, sem.name_of(access.target)) {
                    return false;
                }
                if space == "workgroup" {
                    if !is_storable(sem, element) {
                        return false;
                    }
                    stages.vertex = false;
                    stages.fragment = false;
                }
            }
            _ => {}
        }
    }

    args.into_iter().all(|arg| check(sem, arg, stages))
}

fn is_legal_access(space: &str, access: &str) -> bool {
    matches!(
        (space, access),
        ("function" | "private" | "workgroup", "read_write")
            | ("uniform" | "handle", "read")
            | ("storage", "read" | "read_write")
    )
}

/// Whether values of `fqn` may live in an array or workgroup variable.
pub fn is_storable(sem: &Sem, fqn: &FullyQualifiedName) -> bool {
    let name = sem.name_of(fqn.target);
    if name == "bool" || name.contains("sampler") || name.contains("texture") {
        return false;
    }

    let mut element = fqn;
    while let Some(inner) = element.name_args().last() {
        element = inner;
    }
    !ABSTRACT_TYPES.contains(&sem.name_of(element.target))
}
