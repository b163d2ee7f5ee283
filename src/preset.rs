use serde::Deserialize;

/// Real dataset rows offered as one-click examples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    None,
    Rock,
    Mine,
}

const ROCK_EXAMPLE: &str = "0.02, 0.0371, 0.0428, 0.0207, 0.0954, 0.0986, 0.1539, 0.1601, 0.3109, 0.2111, 0.1609, 0.1582, 0.2238, 0.0645, 0.066, 0.2273, 0.31, 0.2999, 0.5078, 0.4797, 0.5783, 0.5071, 0.4328, 0.555, 0.6711, 0.6415, 0.7104, 0.808, 0.6791, 0.3857, 0.1307, 0.2604, 0.5121, 0.7547, 0.8537, 0.8507, 0.6692, 0.6097, 0.4943, 0.2744, 0.051, 0.2834, 0.2825, 0.4256, 0.2641, 0.1386, 0.1051, 0.1343, 0.0383, 0.0324, 0.0232, 0.0027, 0.0065, 0.0159, 0.0072, 0.0167, 0.018, 0.0084, 0.009, 0.0032";

const MINE_EXAMPLE: &str = "0.0491, 0.0279, 0.0592, 0.127, 0.1772, 0.1908, 0.2217, 0.0768, 0.1246, 0.2028, 0.0947, 0.2497, 0.2209, 0.3195, 0.334, 0.3323, 0.278, 0.2975, 0.2948, 0.1729, 0.3264, 0.3834, 0.3523, 0.541, 0.5228, 0.4475, 0.534, 0.5323, 0.3907, 0.3456, 0.4091, 0.4639, 0.558, 0.5727, 0.6355, 0.7563, 0.6903, 0.6176, 0.5379, 0.5622, 0.6508, 0.4797, 0.3757, 0.3051, 0.1995, 0.1073, 0.0588, 0.0251, 0.0174, 0.025, 0.0081, 0.0129, 0.0161, 0.0063, 0.0119, 0.0194, 0.014, 0.0332, 0.0439, 0.0198";

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::None, Preset::Rock, Preset::Mine];

    pub fn key(self) -> &'static str {
        match self {
            Preset::None => "none",
            Preset::Rock => "rock",
            Preset::Mine => "mine",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Preset::None => "None",
            Preset::Rock => "Rock example",
            Preset::Mine => "Mine example",
        }
    }

    /// Text placed in the input box when the preset is loaded.
    pub fn text(self) -> &'static str {
        match self {
            Preset::None => "",
            Preset::Rock => ROCK_EXAMPLE,
            Preset::Mine => MINE_EXAMPLE,
        }
    }
}
