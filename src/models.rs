use std::fmt;
use std::str::FromStr;

/// One of the three pretrained classifiers shipped with the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelChoice {
    Adam,
    Sgd,
    Rmsprop,
}

impl ModelChoice {
    pub const ALL: [ModelChoice; 3] = [ModelChoice::Adam, ModelChoice::Sgd, ModelChoice::Rmsprop];

    /// Name shown in the model picker and used for storage paths
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelChoice::Adam => "Model 1 Adam",
            ModelChoice::Sgd => "Model 2 SGD",
            ModelChoice::Rmsprop => "Model 3 Rmsprop",
        }
    }

    /// Artifact file name inside the model directory
    pub fn file_name(&self) -> &'static str {
        match self {
            ModelChoice::Adam => "model1_adam.rten",
            ModelChoice::Sgd => "model2_sgd.rten",
            ModelChoice::Rmsprop => "model3_rmsprop.rten",
        }
    }

    /// Short key accepted on the command line
    pub fn key(&self) -> &'static str {
        match self {
            ModelChoice::Adam => "adam",
            ModelChoice::Sgd => "sgd",
            ModelChoice::Rmsprop => "rmsprop",
        }
    }

    /// Storage folder: the display name with spaces replaced by underscores
    pub fn folder_name(&self) -> String {
        self.display_name().replace(' ', "_")
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ModelChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ModelChoice::ALL
            .into_iter()
            .find(|m| {
                m.display_name().eq_ignore_ascii_case(wanted)
                    || m.key().eq_ignore_ascii_case(wanted)
                    || m.folder_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| {
                format!(
                    "unknown model '{}', expected one of: {}",
                    s,
                    ModelChoice::ALL.map(|m| m.key()).join(", ")
                )
            })
    }
}

/// The five flat shapes the classifiers recognise, in model output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeClass {
    Parallelogram,
    Circle,
    Rectangle,
    Triangle,
    Trapezoid,
}

impl ShapeClass {
    pub const ALL: [ShapeClass; 5] = [
        ShapeClass::Parallelogram,
        ShapeClass::Circle,
        ShapeClass::Rectangle,
        ShapeClass::Triangle,
        ShapeClass::Trapezoid,
    ];

    /// Label as the models were trained with it
    pub fn label(&self) -> &'static str {
        match self {
            ShapeClass::Parallelogram => "jajargenjang",
            ShapeClass::Circle => "lingkaran",
            ShapeClass::Rectangle => "segiempat",
            ShapeClass::Triangle => "segitiga",
            ShapeClass::Trapezoid => "trapesium",
        }
    }

    pub fn from_index(index: usize) -> Option<ShapeClass> {
        ShapeClass::ALL.get(index).copied()
    }

    pub fn folder_name(&self) -> String {
        self.label().replace(' ', "_")
    }
}

impl fmt::Display for ShapeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShapeClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeClass::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown shape '{}', expected one of: {}",
                    s,
                    ShapeClass::ALL.map(|c| c.label()).join(", ")
                )
            })
    }
}

/// Output of a single forward pass
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub class: ShapeClass,
    pub scores: Vec<f32>,
}

impl Prediction {
    pub fn confidence(&self) -> f32 {
        self.scores
            .get(ShapeClass::ALL.iter().position(|c| *c == self.class).unwrap_or(0))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Where a drawing ended up after upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRecord {
    pub file_name: String,
    pub remote_path: String,
    pub public_url: String,
}
