use crate::{
    builtin::builtin_registry,
    cli::Args,
    creator::{CreateOptions, Creator},
    error::Result,
    ioutils::get_output_dir,
    preset::Preset,
};
use log::{debug, info};

/// Main CLI runner that orchestrates project creation
pub struct Runner {
    args: Args,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Executes the complete project creation workflow
    pub fn run(self) -> Result<()> {
        let output_root = get_output_dir(self.args.output_dir(), self.args.force)?;

        let preset = self.load_preset()?;
        debug!(
            "Preset plugins: {}",
            preset.plugins.keys().cloned().collect::<Vec<_>>().join(", ")
        );

        let mut registry = builtin_registry();
        preset.register_declarative(&mut registry);

        let creator = Creator::new(&self.args.name, &output_root);
        creator.create(&preset, &registry, self.create_options())?;

        println!(
            "Project '{}' created successfully in {}.",
            self.args.name,
            output_root.display()
        );
        Ok(())
    }

    /// Loads the preset given on the command line, or the built-in default
    fn load_preset(&self) -> Result<Preset> {
        match &self.args.preset {
            Some(path) => Preset::load(path),
            None => {
                info!("No preset given, using the default preset");
                Ok(Preset::builtin_default())
            }
        }
    }

    fn create_options(&self) -> CreateOptions {
        CreateOptions {
            extract_config_files: self.args.extract_config_files,
            sort_manifest: !self.args.no_sort,
            conflict_policy: self.args.merge_conflicts.into(),
            dry_run: self.args.dry_run,
        }
    }
}

/// Main entry point for CLI execution
pub fn run(args: Args) -> Result<()> {
    let runner = Runner::new(args);
    runner.run()
}
