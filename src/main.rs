use anyhow::Context;
use log::info;
use rand::SeedableRng;

use radiant::{
    cli::{parse_args, Arguments},
    render::Renderer,
    scenes,
};

fn main() -> anyhow::Result<()> {
    // Parsing cli args
    let cli_args: Arguments = parse_args();

    env_logger::Builder::new()
        .filter_level(cli_args.verbosity.log_level_filter())
        .init();

    // set up enviroment
    let seed = if let Some(seed) = cli_args.seed {
        // use user-provided seed if available
        seed
    } else if cfg!(debug_assertions) {
        // if debugging, use deterministic seed
        0
    } else {
        // otherwise real psuedo-randomness
        rand::random()
    };
    info!("using seed {seed}");
    let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);

    // Get scene
    let scene = scenes::get_scene(cli_args.image_width, cli_args.scene, &mut rng)
        .with_context(|| format!("failed to build scene {:?}", cli_args.scene))?;

    let (width, height) = scene.dimensions;
    let renderer = Renderer::new(
        width,
        height,
        cli_args.samples_per_pixel,
        cli_args.bounce_depth,
    )
    .with_strategy(cli_args.sampling)
    .with_seed(seed);

    let img_buf = renderer.render_scene(&scene);

    // write image to file
    img_buf
        .save(&cli_args.output)
        .with_context(|| format!("failed to write {}", cli_args.output.display()))?;
    info!("image written to {}", cli_args.output.display());

    Ok(())
}
