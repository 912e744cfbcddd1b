use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Classification label assigned by the backend. The vocabulary is fixed
/// but open-ended: unknown labels are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Politica,
    Economia,
    Tecnologia,
    Saude,
    Desporto,
    Cultura,
    GuerraEConflitos,
    Ambiente,
    DireitosHumanos,
    Ciencia,
    Geral,
    Other(String),
}

impl Category {
    pub const KNOWN: [Category; 11] = [
        Category::Politica,
        Category::Economia,
        Category::Tecnologia,
        Category::Saude,
        Category::Desporto,
        Category::Cultura,
        Category::GuerraEConflitos,
        Category::Ambiente,
        Category::DireitosHumanos,
        Category::Ciencia,
        Category::Geral,
    ];

    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::KNOWN
            .iter()
            .find(|c| c.label() == label)
            .cloned()
            .unwrap_or_else(|| Category::Other(label.to_string()))
    }

    pub fn label(&self) -> &str {
        match self {
            Category::Politica => "Política",
            Category::Economia => "Economia",
            Category::Tecnologia => "Tecnologia",
            Category::Saude => "Saúde",
            Category::Desporto => "Desporto",
            Category::Cultura => "Cultura",
            Category::GuerraEConflitos => "Guerra e Conflitos",
            Category::Ambiente => "Ambiente",
            Category::DireitosHumanos => "Direitos Humanos",
            Category::Ciencia => "Ciência",
            Category::Geral => "Geral",
            Category::Other(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Other(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Category::from_label(&label))
    }
}
