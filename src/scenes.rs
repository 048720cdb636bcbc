//! Scene generation functionality

use std::{ops::Range, path::PathBuf, sync::Arc};

use glam::Vec3A;
use log::debug;
use rand::Rng;

use crate::{
    bvh::Bvh,
    camera::Camera,
    color::Color,
    error::SceneError,
    hittables::*,
    material::Material,
    textures::*,
};

/// Possible hard-coded scenes to choose from.
#[derive(Debug, Clone, Copy, clap::clap_derive::ValueEnum)]
pub enum SceneType {
    /// Scene like the cover of "Ray Tracing in One Weekend", with motion blur.
    RandomSpheres,
    /// Two checkered spheres with the camera looking at their point of contact
    TwoSpheres,
    /// A Perlin noise ground under a marble sphere
    TwoPerlinSpheres,
    /// A single sphere with an image of Earth mapped to it
    Earth,
    /// Marble spheres lit by a rectangular and a spherical light
    SimpleLight,
    /// The famous [Cornell Box scene](https://en.wikipedia.org/wiki/Cornell_box)
    CornellBox,
    /// The Cornell Box with its two boxes made of smoke
    CornellSmoke,
    /// The Final Scene from Ray Tracing in One Weekend: The Next Week
    FinalScene,
}

/// Everything needed to render one image.
pub struct Scene {
    pub camera: Camera,
    /// All geometry, behind a single hierarchy
    pub world: Bvh,
    /// The emitters, for light sampling
    pub lights: HittableList,
    /// Radiance of rays escaping the scene
    pub background: Color,
    /// Image dimensions as `(width, height)`
    pub dimensions: (u32, u32),
}

/// Geometry produced by a scene generator
struct SceneGeometry {
    world: HittableList,
    lights: HittableList,
}

impl From<HittableList> for SceneGeometry {
    fn from(world: HittableList) -> Self {
        Self {
            world,
            lights: HittableList::new(),
        }
    }
}

/// Builds the chosen scene for an image `image_width` pixels wide.
///
/// Fails if the geometry cannot be placed into a [Bvh].
pub fn get_scene(
    image_width: u32,
    scene_type: SceneType,
    rng: &mut impl Rng,
) -> Result<Scene, SceneError> {
    // Setup default camera properties
    let mut aspect_ratio = 16.0 / 9.0;
    let mut look_from = Vec3A::new(13.0, 2.0, 3.0);
    let mut look_at = Vec3A::ZERO;
    let view_up = Vec3A::Y;
    let mut vert_fov = 20.0;
    let mut aperture = 0.0;
    let focus_dist = 10.0;
    let shutter_time: Range<f32> = 0.0..1.0;
    let mut background = Color::new(0.7, 0.8, 1.0);

    // Grabs the scene and changes any cam params
    let geometry = match scene_type {
        SceneType::RandomSpheres => {
            aperture = 0.1;
            aspect_ratio = 3.0 / 2.0;
            gen_random_scene(rng).into()
        }
        SceneType::TwoSpheres => gen_two_spheres().into(),
        SceneType::TwoPerlinSpheres => gen_two_perlin_spheres(rng).into(),
        SceneType::Earth => gen_earth().into(),
        SceneType::SimpleLight => {
            background = Color::ZERO;
            look_from = Vec3A::new(26.0, 3.0, 6.0);
            look_at = Vec3A::new(0.0, 2.0, 0.0);
            gen_simple_light(rng)
        }
        SceneType::CornellBox => {
            aspect_ratio = 1.0;
            background = Color::ZERO;
            look_from = Vec3A::new(278.0, 278.0, -800.0);
            look_at = Vec3A::new(278.0, 278.0, 0.0);
            vert_fov = 40.0;
            gen_cornell_box()
        }
        SceneType::CornellSmoke => {
            aspect_ratio = 1.0;
            background = Color::ZERO;
            look_from = Vec3A::new(278.0, 278.0, -800.0);
            look_at = Vec3A::new(278.0, 278.0, 0.0);
            vert_fov = 40.0;
            gen_cornell_smoke()?
        }
        SceneType::FinalScene => {
            aspect_ratio = 1.0;
            background = Color::ZERO;
            look_from = Vec3A::new(478.0, 278.0, -600.0);
            look_at = Vec3A::new(278.0, 278.0, 0.0);
            vert_fov = 40.0;
            gen_final_scene(rng)?
        }
    };

    debug!(
        "{scene_type:?}: {} top-level objects, {} lights",
        geometry.world.len(),
        geometry.lights.len()
    );

    // set up camera with (possibly modified) properies
    let camera = Camera::new(
        look_from,
        look_at,
        view_up,
        vert_fov,
        aspect_ratio,
        aperture,
        focus_dist,
        shutter_time.clone(),
    );
    let world = Bvh::new(geometry.world, shutter_time.start, shutter_time.end, rng)?;

    let image_height = ((image_width as f32 / aspect_ratio) as u32).max(1);

    Ok(Scene {
        camera,
        world,
        lights: geometry.lights,
        background,
        dimensions: (image_width, image_height),
    })
}

fn solid(color: Color) -> Arc<dyn Texture> {
    Arc::new(SolidColor::new(color))
}

fn lambertian(color: Color) -> Arc<Material> {
    Arc::new(Material::Lambertian {
        albedo: solid(color),
    })
}

fn diffuse_light(color: Color) -> Arc<Material> {
    Arc::new(Material::DiffuseLight { emit: solid(color) })
}

fn checker() -> Arc<dyn Texture> {
    Arc::new(Checkered::new(
        &solid(Color::new(0.2, 0.3, 0.1)),
        &solid(Color::new(0.9, 0.9, 0.9)),
    ))
}

/// Returns a [HittableList] containing randomly-generated spheres
fn gen_random_scene(rng: &mut impl Rng) -> HittableList {
    //  Create ground sphere
    let ground_material = Arc::new(Material::Lambertian { albedo: checker() });
    let mut world: HittableList =
        vec![Sphere::new(Vec3A::new(0.0, -1000.0, 0.0), 1000.0, &ground_material).wrap()];

    // The random generation part
    const ORIGIN: Vec3A = Vec3A::from_array([4.0, 0.2, 0.0]);
    for a in -11..11 {
        for b in -11..11 {
            let decide_mat = rng.gen::<f32>();
            let center = Vec3A::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            if (center - ORIGIN).length() <= 0.9 {
                continue;
            }

            // pick a material by "rarity"
            if decide_mat < 0.8 {
                // diffuse, and bouncing during the exposure
                let mat = lambertian(rng.gen::<Vec3A>() * rng.gen::<Vec3A>());
                let center2 = center + Vec3A::Y * rng.gen_range(0.0..0.5);
                world.push(MovingSphere::new(center, center2, 0.0, 1.0, 0.2, &mat).wrap());
            } else if decide_mat < 0.95 {
                // metal
                let albedo = Vec3A::splat(0.5) + 0.5 * rng.gen::<Vec3A>();
                let mat = Arc::new(Material::fuzzy_metal(albedo, rng.gen_range(0.0..0.5)));
                world.push(Sphere::new(center, 0.2, &mat).wrap());
            } else {
                // glass
                let mat = Arc::new(Material::Dielectric { refract_index: 1.5 });
                world.push(Sphere::new(center, 0.2, &mat).wrap());
            }
        }
    }

    // The signature central spheres
    let mat_1 = Arc::new(Material::Dielectric { refract_index: 1.5 });
    let mat_2 = lambertian(Color::new(0.4, 0.2, 0.1));
    let mat_3 = Arc::new(Material::Metal {
        albedo: Color::new(0.7, 0.6, 0.5),
    });

    world.push(Sphere::new(Vec3A::new(0.0, 1.0, 0.0), 1.0, &mat_1).wrap());
    world.push(Sphere::new(Vec3A::new(-4.0, 1.0, 0.0), 1.0, &mat_2).wrap());
    world.push(Sphere::new(Vec3A::new(4.0, 1.0, 0.0), 1.0, &mat_3).wrap());

    world
}

/// Returns a [HittableList] containing two checkered spheres.
fn gen_two_spheres() -> HittableList {
    let checkered = Arc::new(Material::Lambertian { albedo: checker() });

    vec![
        Sphere::new(Vec3A::new(0.0, -10.0, 0.0), 10.0, &checkered).wrap(),
        Sphere::new(Vec3A::new(0.0, 10.0, 0.0), 10.0, &checkered).wrap(),
    ]
}

/// Returns a [HittableList] containing two Perlin noise spheres.
fn gen_two_perlin_spheres(rng: &mut impl Rng) -> HittableList {
    let noise = PerlinNoise::new(rng);
    let ground = Arc::new(Material::Lambertian {
        albedo: Arc::new(NoiseTexture::new(noise.clone(), 4.0)),
    });
    let marble = Arc::new(Material::Lambertian {
        albedo: Arc::new(MarbleTexture::new(noise, 4.0)),
    });

    vec![
        Sphere::new(Vec3A::new(0.0, -1000.0, 0.0), 1000.0, &ground).wrap(),
        Sphere::new(Vec3A::new(0.0, 2.0, 0.0), 2.0, &marble).wrap(),
    ]
}

fn earth_texture() -> Arc<dyn Texture> {
    Arc::new(ImageMap::new(PathBuf::from("resources/earthmap.jpg")))
}

/// Returns a [HittableList] containing a single image-backed sphere.
fn gen_earth() -> HittableList {
    let earth = Arc::new(Material::Lambertian {
        albedo: earth_texture(),
    });

    vec![Sphere::new(Vec3A::ZERO, 2.0, &earth).wrap()]
}

/// Two marble spheres, a rectangular light behind them and a spherical light above
fn gen_simple_light(rng: &mut impl Rng) -> SceneGeometry {
    let marble = Arc::new(Material::Lambertian {
        albedo: Arc::new(MarbleTexture::new(PerlinNoise::new(rng), 4.0)),
    });
    let light = diffuse_light(Color::splat(4.0));

    let rect_light = AxisRect::xy(3.0, 5.0, 1.0, 3.0, -2.0, &light).wrap();
    let sphere_light = Sphere::new(Vec3A::new(0.0, 7.0, 0.0), 2.0, &light).wrap();

    SceneGeometry {
        world: vec![
            Sphere::new(Vec3A::new(0.0, -1000.0, 0.0), 1000.0, &marble).wrap(),
            Sphere::new(Vec3A::new(0.0, 2.0, 0.0), 2.0, &marble).wrap(),
            Arc::clone(&rect_light),
            Arc::clone(&sphere_light),
        ],
        lights: vec![rect_light, sphere_light],
    }
}

/// The five walls of the Cornell Box, without a light
fn cornell_walls() -> HittableList {
    let red = lambertian(Color::new(0.65, 0.05, 0.05));
    let white = lambertian(Color::splat(0.73));
    let green = lambertian(Color::new(0.12, 0.45, 0.15));

    vec![
        AxisRect::yz(0.0, 555.0, 0.0, 555.0, 555.0, &green).wrap(),
        AxisRect::yz(0.0, 555.0, 0.0, 555.0, 0.0, &red).wrap(),
        AxisRect::xz(0.0, 555.0, 0.0, 555.0, 0.0, &white).wrap(),
        AxisRect::xz(0.0, 555.0, 0.0, 555.0, 555.0, &white).wrap(),
        AxisRect::xy(0.0, 555.0, 0.0, 555.0, 555.0, &white).wrap(),
    ]
}

/// The tall and the short box of the Cornell Box, rotated and placed on the floor
fn cornell_boxes() -> [Arc<dyn Hittable>; 2] {
    let white = lambertian(Color::splat(0.73));

    let tall_box = QuadBox::new(Vec3A::ZERO, Vec3A::new(165.0, 330.0, 165.0), &white).wrap();
    let tall_box = RotateY::new(&tall_box, 15.0).wrap();
    let tall_box = Translate::new(&tall_box, Vec3A::new(265.0, 0.0, 295.0)).wrap();

    let short_box = QuadBox::new(Vec3A::ZERO, Vec3A::splat(165.0), &white).wrap();
    let short_box = RotateY::new(&short_box, -18.0).wrap();
    let short_box = Translate::new(&short_box, Vec3A::new(130.0, 0.0, 65.0)).wrap();

    [tall_box, short_box]
}

/// A ceiling light facing down into the box
fn ceiling_light(x: Range<f32>, z: Range<f32>, color: Color) -> Arc<dyn Hittable> {
    let light = diffuse_light(color);
    let rect = AxisRect::xz(x.start, x.end, z.start, z.end, 554.0, &light).wrap();
    FlipFace::new(rect).wrap()
}

/// The Cornell Box scene as defined by the Ray Tracing in One Weekend: The Next Week
fn gen_cornell_box() -> SceneGeometry {
    let light = ceiling_light(213.0..343.0, 227.0..332.0, Color::splat(15.0));

    let mut world = cornell_walls();
    world.extend(cornell_boxes());
    world.push(Arc::clone(&light));

    SceneGeometry {
        world,
        lights: vec![light],
    }
}

/// The Cornell Box with a larger, dimmer light and boxes of black and white smoke
fn gen_cornell_smoke() -> Result<SceneGeometry, SceneError> {
    let light = ceiling_light(113.0..443.0, 127.0..432.0, Color::splat(7.0));

    let [tall_box, short_box] = cornell_boxes();
    let mut world = cornell_walls();
    world.push(ConstantMedium::new(&tall_box, &solid(Color::ZERO), 0.01)?.wrap());
    world.push(ConstantMedium::new(&short_box, &solid(Color::ONE), 0.01)?.wrap());
    world.push(Arc::clone(&light));

    Ok(SceneGeometry {
        world,
        lights: vec![light],
    })
}

/// Returns the Final Scene of "Ray Tracing: The Next Week"
fn gen_final_scene(rng: &mut impl Rng) -> Result<SceneGeometry, SceneError> {
    let mut world = HittableList::new();

    // ground made of boxes of random heights
    let ground = lambertian(Color::new(0.48, 0.83, 0.53));
    let boxes_per_side = 20;
    let mut ground_boxes = HittableList::with_capacity(boxes_per_side * boxes_per_side);
    for i in 0..boxes_per_side {
        for j in 0..boxes_per_side {
            let w = 100.0;
            let x0 = -1000.0 + i as f32 * w;
            let z0 = -1000.0 + j as f32 * w;
            let y1 = rng.gen_range(1.0..101.0);
            ground_boxes.push(
                QuadBox::new(
                    Vec3A::new(x0, 0.0, z0),
                    Vec3A::new(x0 + w, y1, z0 + w),
                    &ground,
                )
                .wrap(),
            );
        }
    }
    world.push(Bvh::new(ground_boxes, 0.0, 1.0, rng)?.wrap());

    // light
    let light = ceiling_light(123.0..423.0, 147.0..412.0, Color::splat(7.0));
    world.push(Arc::clone(&light));

    // moving sphere
    let center1 = Vec3A::new(400.0, 400.0, 200.0);
    let center2 = center1 + Vec3A::new(30.0, 0.0, 0.0);
    let moving = lambertian(Color::new(0.7, 0.3, 0.1));
    world.push(MovingSphere::new(center1, center2, 0.0, 1.0, 50.0, &moving).wrap());

    // glass and metal spheres
    let glass = Arc::new(Material::Dielectric { refract_index: 1.5 });
    world.push(Sphere::new(Vec3A::new(260.0, 150.0, 45.0), 50.0, &glass).wrap());
    let metal = Arc::new(Material::fuzzy_metal(Color::new(0.8, 0.8, 0.9), 1.0));
    world.push(Sphere::new(Vec3A::new(0.0, 150.0, 145.0), 50.0, &metal).wrap());

    // blue subsurface sphere: a glass shell filled with blue fog
    let boundary = Sphere::new(Vec3A::new(360.0, 150.0, 145.0), 70.0, &glass).wrap();
    world.push(Arc::clone(&boundary));
    world.push(ConstantMedium::new(&boundary, &solid(Color::new(0.2, 0.4, 0.9)), 0.2)?.wrap());

    // thin mist over everything
    let mist = Sphere::new(Vec3A::ZERO, 5000.0, &glass).wrap();
    world.push(ConstantMedium::new(&mist, &solid(Color::ONE), 0.0001)?.wrap());

    // textured spheres
    let earth = Arc::new(Material::Lambertian {
        albedo: earth_texture(),
    });
    world.push(Sphere::new(Vec3A::new(400.0, 200.0, 400.0), 100.0, &earth).wrap());
    let noise = Arc::new(Material::Lambertian {
        albedo: Arc::new(NoiseTexture::new(PerlinNoise::new(rng), 0.1)),
    });
    world.push(Sphere::new(Vec3A::new(220.0, 280.0, 300.0), 80.0, &noise).wrap());

    // a cube-shaped cluster of small spheres
    let white = lambertian(Color::splat(0.73));
    let cluster: HittableList = (0..1000)
        .map(|_| Sphere::new(rng.gen::<Vec3A>() * 165.0, 10.0, &white).wrap())
        .collect();
    let cluster = Bvh::new(cluster, 0.0, 1.0, rng)?.wrap();
    let cluster = RotateY::new(&cluster, 15.0).wrap();
    world.push(Translate::new(&cluster, Vec3A::new(-100.0, 270.0, 395.0)).wrap());

    Ok(SceneGeometry {
        world,
        lights: vec![light],
    })
}
