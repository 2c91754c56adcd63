//! Full-screen post-processing toggles
//!
//! The simulation only decides which effects are on. Drawing them is the
//! renderer's job; it receives the table at the end of each scene.

/// Post-processing effect, also the index into [`PostEffects`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostEffect {
    Shake = 0,
    Chaos,
    Confuse,
}

impl PostEffect {
    pub const COUNT: usize = 3;
    pub const ALL: [PostEffect; Self::COUNT] =
        [PostEffect::Shake, PostEffect::Chaos, PostEffect::Confuse];

    /// Uniform name a shader would expose for this toggle
    pub fn as_str(&self) -> &'static str {
        match self {
            PostEffect::Shake => "shake",
            PostEffect::Chaos => "chaos",
            PostEffect::Confuse => "confuse",
        }
    }
}

/// On/off table indexed by [`PostEffect`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostEffects {
    enabled: [bool; PostEffect::COUNT],
}

impl PostEffects {
    pub fn is_enabled(&self, effect: PostEffect) -> bool {
        self.enabled[effect as usize]
    }

    pub fn set(&mut self, effect: PostEffect, on: bool) {
        self.enabled[effect as usize] = on;
    }

    pub fn enable(&mut self, effect: PostEffect) {
        self.set(effect, true);
    }

    pub fn disable(&mut self, effect: PostEffect) {
        self.set(effect, false);
    }

    /// Enable a screen distortion unless the other one is already showing.
    ///
    /// CHAOS and CONFUSE never render together; whichever got there first
    /// stays. Returns whether `effect` is on afterwards.
    pub fn enable_distortion(&mut self, effect: PostEffect) -> bool {
        let rival = match effect {
            PostEffect::Chaos => Some(PostEffect::Confuse),
            PostEffect::Confuse => Some(PostEffect::Chaos),
            PostEffect::Shake => None,
        };
        if rival.is_some_and(|rival| self.is_enabled(rival)) {
            return self.is_enabled(effect);
        }
        self.enable(effect);
        true
    }

    /// Effects currently on, in index order
    pub fn active(&self) -> impl Iterator<Item = PostEffect> + '_ {
        PostEffect::ALL
            .into_iter()
            .filter(move |effect| self.is_enabled(*effect))
    }
}
