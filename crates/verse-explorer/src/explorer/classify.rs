use super::symbol::SimpleSymbol;

/// Display tag and decorated title of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub tag: String,
    pub title: String,
}

/// Property tags, first matching signature substring wins.
const PROPERTY_TAGS: [(&str, &str); 7] = [
    ("int", "property_int"),
    ("float", "property_float"),
    ("logic", "property_logic"),
    ("[]char", "property_string"),
    ("vector3", "property_vector"),
    ("rotation", "property_rotator"),
    ("transform", "property_transform"),
];

pub fn classify(symbol: &SimpleSymbol) -> Classification {
    let signature = symbol.signature.as_str();
    match symbol.kind.as_str() {
        "Method" => Classification {
            tag: "method".to_string(),
            title: format!("{}()", symbol.name),
        },
        "Property" => {
            let tag = PROPERTY_TAGS
                .iter()
                .find(|(needle, _)| signature.contains(needle))
                .map_or("property_object", |(_, tag)| tag);

            let mut markers = String::new();
            if signature.contains("[]") && !signature.contains("[]char") {
                markers.push_str("[]");
            }
            if signature.contains("->") {
                markers.push_str("[->]");
            }
            if signature.contains("tuple") {
                markers.push_str("(,)");
            }
            if signature.contains('?') {
                markers.push('?');
            }

            let title = if markers.is_empty() {
                symbol.name.clone()
            } else {
                format!("{} {markers}", symbol.name)
            };
            Classification {
                tag: tag.to_string(),
                title,
            }
        },
        kind => Classification {
            tag: kind.to_lowercase(),
            title: symbol.name.clone(),
        },
    }
}

#[cfg(test)]
#[path = "../../tests/src/explorer/classify_tests.rs"]
mod tests;
