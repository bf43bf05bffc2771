//! Seasonal task templates seeded by the backend on first load and on reset.

use super::Season;

/// One templated task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultTask {
    pub task: &'static str,
    pub description: &'static str,
}

impl DefaultTask {
    const fn new(task: &'static str, description: &'static str) -> Self {
        Self { task, description }
    }
}

/// Template tasks for a season, in seeding order.
pub fn default_tasks(season: Season) -> &'static [DefaultTask] {
    match season {
        Season::Spring => SPRING,
        Season::Summer => SUMMER,
        Season::Fall => FALL,
        Season::Winter => WINTER,
    }
}

const SPRING: &[DefaultTask] = &[
    DefaultTask::new("Clean gutters and downspouts", "Remove debris and check for proper drainage"),
    DefaultTask::new("Inspect roof for damage", "Check for missing/damaged shingles or signs of leaks"),
    DefaultTask::new("Service air conditioning system", "Schedule professional maintenance"),
    DefaultTask::new("Check exterior drainage", "Ensure water flows away from foundation"),
    DefaultTask::new("Inspect and clean deck", "Clean, repair, and reseal if needed"),
    DefaultTask::new("Test smoke and CO detectors", "Replace batteries and test functionality"),
    DefaultTask::new("Check for leaks around windows and doors", "Inspect seals and weatherstripping"),
    DefaultTask::new("Trim trees and shrubs", "Remove branches near the house and roof"),
    DefaultTask::new("Inspect foundation for cracks", "Note and repair any new or expanding cracks"),
    DefaultTask::new("Clean outdoor furniture", "Clean and prepare patio furniture for use"),
];

const SUMMER: &[DefaultTask] = &[
    DefaultTask::new("Check irrigation systems", "Ensure sprinklers and watering systems are working properly"),
    DefaultTask::new("Inspect for pest infestations", "Look for signs of termites, ants, or other pests"),
    DefaultTask::new("Clean and inspect outdoor grill", "Clean grates and check propane connections"),
    DefaultTask::new("Check window screens", "Repair any tears or holes in window screens"),
    DefaultTask::new("Service lawn equipment", "Sharpen mower blades and check other equipment"),
    DefaultTask::new("Check pool maintenance", "Test water, clean filters, check equipment (if applicable)"),
    DefaultTask::new("Test garage door and lubricate", "Ensure proper operation and safety features"),
    DefaultTask::new("Clean dryer vent", "Remove lint buildup to prevent fire hazards"),
    DefaultTask::new("Check attic ventilation", "Ensure proper airflow to prevent heat buildup"),
    DefaultTask::new("Inspect driveway and walkways", "Repair cracks and seal if needed"),
];

const FALL: &[DefaultTask] = &[
    DefaultTask::new("Clean gutters and downspouts", "Remove fallen leaves and debris"),
    DefaultTask::new("Service heating system", "Schedule professional maintenance before winter"),
    DefaultTask::new("Check chimney and fireplace", "Clean and inspect for safe operation"),
    DefaultTask::new("Seal gaps and cracks", "Prevent drafts and pests from entering"),
    DefaultTask::new("Test smoke and CO detectors", "Replace batteries and test functionality"),
    DefaultTask::new("Store outdoor furniture", "Clean and store or cover for winter"),
    DefaultTask::new("Drain and store garden hoses", "Prevent freezing and damage"),
    DefaultTask::new("Winterize irrigation system", "Drain water to prevent freezing damage"),
    DefaultTask::new("Inspect roof and repair if needed", "Address issues before winter weather"),
    DefaultTask::new("Rake leaves and aerate lawn", "Prepare lawn for winter dormancy"),
];

const WINTER: &[DefaultTask] = &[
    DefaultTask::new("Check for ice dams on roof", "Remove snow buildup to prevent ice dams"),
    DefaultTask::new("Test sump pump", "Ensure proper operation before spring thaw"),
    DefaultTask::new("Check for drafts", "Identify and seal cold air leaks"),
    DefaultTask::new("Inspect attic insulation", "Check for proper coverage and no moisture issues"),
    DefaultTask::new("Check basement for water leaks", "Inspect during thaws or heavy rain"),
    DefaultTask::new("Monitor humidity levels", "Maintain proper indoor humidity (30-50%)"),
    DefaultTask::new("Check water heater", "Inspect for leaks and flush if needed"),
    DefaultTask::new("Clean refrigerator coils", "Remove dust to improve efficiency"),
    DefaultTask::new("Check emergency supplies", "Update emergency kit for winter storms"),
    DefaultTask::new("Protect outdoor faucets", "Ensure they are drained and insulated"),
];
