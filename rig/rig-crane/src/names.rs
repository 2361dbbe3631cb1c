//! Well-known names of the scene's mechanisms, assemblies and bodies.
//!
//! Constraint setup and cable rigging find bodies by name, so these
//! identifiers are part of the crate's contract.

/// The crane mechanism.
pub const CRANE_MECHANISM: &str = "CraneMechanism";

/// The crane's single assembly.
pub const CRANE_ASSEMBLY: &str = "CraneAssembly";

/// Static pedestal the booms hinge on.
pub const BASE: &str = "base";

/// Spooling drum the cable pays out from.
pub const WINCH: &str = "Winch";

/// Lower boom, hinged on the base.
pub const LOWER_BOOM: &str = "lowerBoom";

/// Telescoping upper boom, sliding along the lower boom.
pub const UPPER_BOOM: &str = "upperBoom";

/// Guide pulley at the middle of the boom.
pub const MID_PULLEY: &str = "MidPulley";

/// Guide pulley at the boom tip.
pub const TIP_PULLEY: &str = "TipPulley";

/// The ground mechanism and its parts.
pub const GROUND_MECHANISM: &str = "GroundMechanism";
/// The ground assembly.
pub const GROUND_ASSEMBLY: &str = "groundAssembly";
/// The static ground slab.
pub const GROUND: &str = "groundPart";

/// The load mechanism.
pub const LOAD_MECHANISM: &str = "LoadMechanism";
/// The load assembly.
pub const LOAD_ASSEMBLY: &str = "LoadAssembly";
/// The dynamic load box the cable ends at.
pub const LOAD: &str = "Load";

/// The hook mechanism.
pub const HOOK_MECHANISM: &str = "HookMechanism";
/// The hook assembly.
pub const HOOK_ASSEMBLY: &str = "HookAssembly";
/// The animated hook the cable slides through.
pub const HOOK: &str = "Hook";

/// The cable dynamics extension on the crane mechanism.
pub const CABLE_DYNAMICS: &str = "My cable dynamics extension";

/// The cable graphics extension on the crane mechanism.
pub const CABLE_GRAPHICS: &str = "My cable graphics extension";
