use crate::{
    diagnostics::{Diagnostics, ErrorCode},
    supergraph::state::SupergraphState,
};

/// An `@inaccessible` object field must not implement an interface field that stays in the API
/// schema: the interface contract would be broken for that type.
pub(super) fn validate(state: &SupergraphState, diagnostics: &mut Diagnostics) {
    for (type_name, object) in &state.objects {
        for (field_name, field) in &object.fields {
            if !field.inaccessible {
                continue;
            }

            for interface_name in &object.interfaces {
                let Some(interface) = state.interfaces.get(interface_name) else {
                    continue;
                };

                let Some(interface_field) = interface.fields.get(field_name) else {
                    continue;
                };

                if !interface_field.inaccessible {
                    diagnostics.push_error(
                        format!(
                            "Field \"{type_name}.{field_name}\" is @inaccessible but implements the interface field \"{interface_name}.{field_name}\", which is in the API schema."
                        ),
                        ErrorCode::ImplementedByInaccessible,
                    );
                }
            }
        }
    }
}
