// Copyright @yucwang 2021

use crate::core::integrator::{FrameContext, Integrator};
use crate::core::primitive::{BlendMode, DrawPrimitive, RenderState, SampleRecord};
use crate::core::session::{Session, VisualizeMode};
use crate::integrators::flat::{FlatIntegrator, FlatStyle};
use crate::integrators::order::TraversalOrder;
use crate::integrators::shaded::ShadedIntegrator;
use crate::integrators::transfer::TransferIntegrator;
use crate::math::spectrum::RGBSpectrum;
use crate::renderers::billboard::billboard;
use crate::renderers::cache::{ArrayCache, CacheKey};
use crate::sensors::camera::Camera;
use crate::volumes::lod::{LodLevel, LodSelector};

pub use super::renderer::{FrameStats, PrimitiveSink, Renderer};

/// Dispatches the session's visualize mode to an integrator and forwards the
/// result to a sink. Keeps the state that lives across frames: the LOD level
/// and the cached sample array.
pub struct SimpleRenderer {
    lod: LodSelector,
    cache: ArrayCache,
}

impl SimpleRenderer {
    pub fn new(session: &Session) -> Self {
        let settings = session.settings();
        Self {
            lod: LodSelector::new(settings.lod_distance, settings.lod_hysteresis),
            cache: ArrayCache::new(),
        }
    }

    pub fn lod_level(&self) -> LodLevel {
        self.lod.level()
    }
}

impl Renderer for SimpleRenderer {
    fn render(&mut self, session: &Session, camera: &Camera, sink: &mut dyn PrimitiveSink) -> FrameStats {
        let mode = session.mode();
        let settings = *session.settings();
        let region = session.region().active();
        let back_to_front = TraversalOrder::back_to_front(camera.forward());

        let mut volume = session.volume();
        let mut billboard_size = settings.billboard_size;
        if mode == VisualizeMode::BillboardsWithLod
            && self.lod.update(camera.distance_to_origin()) == LodLevel::Reduced
        {
            volume = session.reduced_volume();
            billboard_size *= 2.0;
        }

        let (blend, depth_test) = match mode {
            VisualizeMode::None | VisualizeMode::SolidPoints => (BlendMode::Opaque, true),
            VisualizeMode::AdditivePoints => (BlendMode::Additive, false),
            _ => (BlendMode::Alpha, false),
        };
        sink.begin_frame(&RenderState {
            blend,
            depth_test,
            point_size: settings.point_size,
            translation: volume.centering_offset(),
        });

        let mut stats = FrameStats::default();
        if mode == VisualizeMode::None {
            for (from, to) in volume.normalized_bounds().edges().iter() {
                emit(sink, &mut stats, DrawPrimitive::Line { from: *from, to: *to, color: RGBSpectrum::gray(1.0) });
            }
            sink.end_frame();
            return stats;
        }
        if matches!(mode, VisualizeMode::SelectedPointsOnly | VisualizeMode::EnhanceSelectedPoints) {
            for outline in region.outline(&volume.normalized_bounds()) {
                emit(sink, &mut stats, outline);
            }
        }

        let light_dir = session.light_dir();
        let flat_frame = FrameContext {
            volume,
            rules: session.flat_rules(),
            region: &region,
            camera,
            light_dir,
            order: TraversalOrder::default(),
        };
        let frame = FrameContext {
            volume,
            rules: session.rules(),
            region: &region,
            camera,
            light_dir,
            order: back_to_front,
        };

        let records: Vec<SampleRecord> = match mode {
            VisualizeMode::None => Vec::new(),
            VisualizeMode::SolidPoints => FlatIntegrator::new(FlatStyle::Solid).sample(&flat_frame),
            VisualizeMode::AdditivePoints => {
                FlatIntegrator::new(FlatStyle::Additive { gain: settings.additive_gain }).sample(&flat_frame)
            }
            VisualizeMode::ColorAlphaPoints | VisualizeMode::SelectedPointsOnly => TransferIntegrator.sample(&frame),
            VisualizeMode::PhongPoints => ShadedIntegrator::new().sample(&frame),
            VisualizeMode::EnhanceSelectedPoints | VisualizeMode::Billboards | VisualizeMode::BillboardsWithLod => {
                ShadedIntegrator::with_enhancement(settings.enhance_distance).sample(&frame)
            }
            VisualizeMode::DrawAsArray => {
                let key = CacheKey {
                    generation: session.generation(),
                    light: *session.light(),
                    order: back_to_front,
                    region,
                };
                let (records, hit) = self.cache.get_or_build(key, || ShadedIntegrator::new().sample(&frame));
                stats.cache_hit = hit;
                records.to_vec()
            }
        };

        let as_billboards = matches!(mode, VisualizeMode::Billboards | VisualizeMode::BillboardsWithLod);
        for record in records.iter() {
            let primitive = if as_billboards {
                billboard(record, camera, billboard_size)
            } else {
                DrawPrimitive::Point(*record)
            };
            emit(sink, &mut stats, primitive);
        }
        sink.end_frame();

        stats.samples = records.len();
        stats
    }
}

fn emit(sink: &mut dyn PrimitiveSink, stats: &mut FrameStats, primitive: DrawPrimitive) {
    stats.primitives += 1;
    sink.draw(primitive);
}
