// Interface adapters: asset loading, line protocol and stdio wiring.

pub mod assets;
pub mod clock;
pub mod protocol;
pub mod stdio;
