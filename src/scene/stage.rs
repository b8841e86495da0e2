use crate::foundation::core::{Canvas, Rect, Rgba8Premul, Vec2};

/// Handle to a container owned by a [`Stage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub(crate) u32);

/// Handle to a shape owned by a [`Stage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub(crate) u32);

/// A numeric node property a tween can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prop {
    /// Container position x.
    ContainerX(ContainerId),
    /// Container position y.
    ContainerY(ContainerId),
    /// Shape position x (relative to its container).
    ShapeX(ShapeId),
    /// Shape position y (relative to its container).
    ShapeY(ShapeId),
}

/// Grouping node. Moving a container moves all of its shapes.
#[derive(Clone, Debug)]
pub struct Container {
    pub(crate) position: Vec2,
    pub(crate) children: Vec<ShapeId>,
}

impl Container {
    /// Position in stage coordinates.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Shapes in draw order.
    pub fn children(&self) -> &[ShapeId] {
        &self.children
    }
}

/// A filled rectangle. `rect` is in local coordinates and is offset by `position` and then by
/// the owning container's position.
#[derive(Clone, Debug)]
pub struct Shape {
    pub(crate) parent: ContainerId,
    pub(crate) rect: Rect,
    pub(crate) fill: Rgba8Premul,
    pub(crate) position: Vec2,
    pub(crate) visible: bool,
    pub(crate) mask: Option<ShapeId>,
    pub(crate) is_mask: bool,
}

impl Shape {
    /// Owning container.
    pub fn parent(&self) -> ContainerId {
        self.parent
    }

    /// Local geometry.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Fill color.
    pub fn fill(&self) -> Rgba8Premul {
        self.fill
    }

    /// Offset relative to the owning container.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Whether the shape is drawn.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Clipping shape, if any.
    pub fn mask(&self) -> Option<ShapeId> {
        self.mask
    }

    /// Mask shapes only clip; they are never drawn themselves.
    pub fn is_mask(&self) -> bool {
        self.is_mask
    }
}

/// Root of the scene graph: the rendered surface plus the attached containers in draw order.
#[derive(Clone, Debug)]
pub struct Stage {
    canvas: Canvas,
    background: Rgba8Premul,
    containers: Vec<Container>,
    shapes: Vec<Shape>,
    attached: Vec<ContainerId>,
}

impl Stage {
    /// Create an empty stage.
    pub fn new(canvas: Canvas, background: Rgba8Premul) -> Self {
        Self {
            canvas,
            background,
            containers: Vec::new(),
            shapes: Vec::new(),
            attached: Vec::new(),
        }
    }

    /// Current surface size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Resize the rendered surface. Node geometry is left untouched.
    pub fn resize(&mut self, canvas: Canvas) {
        self.canvas = canvas;
    }

    /// Clear color.
    pub fn background(&self) -> Rgba8Premul {
        self.background
    }

    /// Create a detached, empty container at the origin.
    pub fn create_container(&mut self) -> ContainerId {
        let id = ContainerId(self.containers.len() as u32);
        self.containers.push(Container {
            position: Vec2::ZERO,
            children: Vec::new(),
        });
        id
    }

    /// Append a visible rectangle to `parent`.
    pub fn add_rect(&mut self, parent: ContainerId, rect: Rect, fill: Rgba8Premul) -> ShapeId {
        self.push_shape(parent, rect, fill, false)
    }

    /// Append a clipping rectangle to `parent`. Assign it with [`Stage::set_mask`].
    pub fn add_mask(&mut self, parent: ContainerId, rect: Rect) -> ShapeId {
        self.push_shape(parent, rect, Rgba8Premul::opaque(0, 0, 0), true)
    }

    fn push_shape(
        &mut self,
        parent: ContainerId,
        rect: Rect,
        fill: Rgba8Premul,
        is_mask: bool,
    ) -> ShapeId {
        let id = ShapeId(self.shapes.len() as u32);
        self.shapes.push(Shape {
            parent,
            rect,
            fill,
            position: Vec2::ZERO,
            visible: true,
            mask: None,
            is_mask,
        });
        self.containers[parent.0 as usize].children.push(id);
        id
    }

    /// Clip `shape` to `mask`'s world rectangle.
    pub fn set_mask(&mut self, shape: ShapeId, mask: Option<ShapeId>) {
        self.shapes[shape.0 as usize].mask = mask;
    }

    /// Borrow a container.
    pub fn container(&self, id: ContainerId) -> &Container {
        &self.containers[id.0 as usize]
    }

    /// Borrow a shape.
    pub fn shape(&self, id: ShapeId) -> &Shape {
        &self.shapes[id.0 as usize]
    }

    /// Set a container's position.
    pub fn set_container_position(&mut self, id: ContainerId, position: Vec2) {
        self.containers[id.0 as usize].position = position;
    }

    /// Set a shape's offset inside its container.
    pub fn set_shape_position(&mut self, id: ShapeId, position: Vec2) {
        self.shapes[id.0 as usize].position = position;
    }

    /// Show or hide a shape.
    pub fn set_visible(&mut self, id: ShapeId, visible: bool) {
        self.shapes[id.0 as usize].visible = visible;
    }

    /// Attach a container to the stage. Attaching an attached container moves it on top.
    pub fn attach(&mut self, id: ContainerId) {
        self.attached.retain(|&c| c != id);
        self.attached.push(id);
    }

    /// Detach a container. No-op when it is not attached.
    pub fn detach(&mut self, id: ContainerId) {
        self.attached.retain(|&c| c != id);
    }

    /// Whether `id` is currently attached.
    pub fn is_attached(&self, id: ContainerId) -> bool {
        self.attached.contains(&id)
    }

    /// Attached containers in draw order.
    pub fn attached(&self) -> &[ContainerId] {
        &self.attached
    }

    /// A shape's rectangle in stage coordinates.
    pub fn world_rect(&self, id: ShapeId) -> Rect {
        let shape = self.shape(id);
        let offset = shape.position + self.container(shape.parent).position;
        shape.rect + offset
    }

    /// Read a tweenable property.
    pub fn get(&self, prop: Prop) -> f64 {
        match prop {
            Prop::ContainerX(id) => self.container(id).position.x,
            Prop::ContainerY(id) => self.container(id).position.y,
            Prop::ShapeX(id) => self.shape(id).position.x,
            Prop::ShapeY(id) => self.shape(id).position.y,
        }
    }

    /// Write a tweenable property.
    pub fn set(&mut self, prop: Prop, value: f64) {
        match prop {
            Prop::ContainerX(id) => self.containers[id.0 as usize].position.x = value,
            Prop::ContainerY(id) => self.containers[id.0 as usize].position.y = value,
            Prop::ShapeX(id) => self.shapes[id.0 as usize].position.x = value,
            Prop::ShapeY(id) => self.shapes[id.0 as usize].position.y = value,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/stage.rs"]
mod tests;
