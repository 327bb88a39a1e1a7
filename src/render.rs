use crate::constants::CLEAR_COLOR;
use card_core::{Camera, CardFrame, TextureRef};
use web_sys as web;

mod card;
mod helpers;

use card::{create_card_resources, CardGpuUniforms, CardResources};

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    card: CardResources,
    // Kept alive for the bind group that samples it
    _card_tex: wgpu::Texture,
    card_bg: wgpu::BindGroup,
    // Which selection the bound texture shows; `None` while the placeholder is up
    bound: Option<TextureRef>,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let card = create_card_resources(&device, format);
        let (card_tex, card_view) = helpers::create_placeholder_texture(&device, &queue);
        let card_bg = card.bind_group(&device, &card_view);
        log::info!("[gpu] ready {}x{} {:?}", width, height, format);

        let [r, g, b, a] = CLEAR_COLOR;
        Ok(Self {
            surface,
            device,
            queue,
            config,
            card,
            _card_tex: card_tex,
            card_bg,
            bound: None,
            width,
            height,
            clear_color: wgpu::Color { r, g, b, a },
        })
    }

    /// Selection the bound texture was loaded for.
    pub fn bound_texture(&self) -> Option<TextureRef> {
        self.bound
    }

    /// Replace the card texture with a decoded browser image.
    pub fn set_texture_from_image(&mut self, image: &web::HtmlImageElement, for_ref: TextureRef) {
        let w = image.natural_width();
        let h = image.natural_height();
        if w == 0 || h == 0 {
            log::warn!("[gpu] image for {:?} has no size; keeping current texture", for_ref);
            return;
        }
        let (tex, view) = helpers::create_card_texture(&self.device, w, h);
        self.queue.copy_external_image_to_texture(
            &wgpu::CopyExternalImageSourceInfo {
                source: wgpu::ExternalImageSource::HTMLImageElement(image.clone()),
                origin: wgpu::Origin2d::ZERO,
                flip_y: false,
            },
            wgpu::CopyExternalImageDestInfo {
                texture: &tex,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
                color_space: wgpu::PredefinedColorSpace::Srgb,
                premultiplied_alpha: false,
            },
            wgpu::Extent3d {
                width: w,
                height: h,
                depth_or_array_layers: 1,
            },
        );
        self.card_bg = self.card.bind_group(&self.device, &view);
        self._card_tex = tex;
        self.bound = Some(for_ref);
        log::info!("[gpu] card texture {}x{} for {:?}", w, h, for_ref.content);
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            log::debug!("[gpu] resized to {}x{}", width, height);
        }
    }

    pub fn render(&mut self, frame: &CardFrame, camera: &Camera) -> Result<(), wgpu::SurfaceError> {
        let surface_tex = self.surface.get_current_texture()?;
        let view = surface_tex
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let uniforms = CardGpuUniforms::new(frame, camera);
        self.queue
            .write_buffer(&self.card.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("card_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.card.pipeline);
            rpass.set_bind_group(0, &self.card_bg, &[]);
            rpass.set_vertex_buffer(0, self.card.vertex_buffer.slice(..));
            rpass.set_index_buffer(self.card.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..self.card.index_count, 0, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        surface_tex.present();
        Ok(())
    }
}
