use crate::assets::TextureHandle;

/// Closed set of matcap textures selectable from the debug panel.
/// Named after the source image files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcapChoice {
    Matcap8,
    Matcap2,
    Matcap3,
    Matcap4,
}

impl MatcapChoice {
    pub const ALL: [MatcapChoice; 4] = [
        MatcapChoice::Matcap8,
        MatcapChoice::Matcap2,
        MatcapChoice::Matcap3,
        MatcapChoice::Matcap4,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MatcapChoice::Matcap8 => "matcap 8",
            MatcapChoice::Matcap2 => "matcap 2",
            MatcapChoice::Matcap3 => "matcap 3",
            MatcapChoice::Matcap4 => "matcap 4",
        }
    }

    fn index(&self) -> usize {
        match self {
            MatcapChoice::Matcap8 => 0,
            MatcapChoice::Matcap2 => 1,
            MatcapChoice::Matcap3 => 2,
            MatcapChoice::Matcap4 => 3,
        }
    }
}

/// The one material shared by the text mesh and every donut. Swapping the
/// matcap here is immediately visible on everything that references it.
#[derive(Debug)]
pub struct MatcapMaterial {
    textures: [TextureHandle; 4],
    choice: MatcapChoice,
}

impl MatcapMaterial {
    /// Bind to the four loaded matcap handles, starting on the primary one
    pub fn new(textures: [TextureHandle; 4]) -> Self {
        Self {
            textures,
            choice: MatcapChoice::Matcap8,
        }
    }

    pub fn choice(&self) -> MatcapChoice {
        self.choice
    }

    pub fn set_choice(&mut self, choice: MatcapChoice) {
        self.choice = choice;
    }

    /// Handle of the currently selected matcap
    pub fn active_texture(&self) -> TextureHandle {
        self.textures[self.choice.index()]
    }

    pub fn texture_for(&self, choice: MatcapChoice) -> TextureHandle {
        self.textures[choice.index()]
    }
}
