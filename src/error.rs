use thiserror::Error;

/// Top-level error type for the dungen layout kernel.
#[derive(Debug, Error)]
pub enum DungenError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Blueprint(#[from] BlueprintError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("a polygon ring needs at least 3 vertices, got {0}")]
    RingTooSmall(usize),

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised when a room blueprint violates one of its construction
/// invariants. Construction never produces a usable value on failure.
#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error("blueprint {name:?}: a room needs at least one door")]
    NoDoors { name: String },

    #[error("blueprint {name:?}: the outline needs at least 4 vertices, got {count}")]
    TooFewVertices { name: String, count: usize },

    #[error("blueprint {name:?}: the outline's vertices need to be in clockwise order")]
    NotClockwise { name: String },

    #[error("blueprint {name:?}: all outline vertices have to be unique")]
    DuplicateVertex { name: String },

    #[error("blueprint {name:?}: the outline needs to consist of axis-aligned edges only")]
    NotRectilinear { name: String },

    #[error("blueprint {name:?}: all doors have to be unique")]
    DuplicateDoor { name: String },

    #[error("blueprint {name:?}: door ({x}, {y}) needs to lie on exactly one outline edge")]
    DoorOffBoundary { name: String, x: f64, y: f64 },

    #[error("blueprint {name:?}: two doors can not be adjacent")]
    AdjacentDoors { name: String },

    #[error("blueprint {name:?}: the {point} point needs to lie strictly inside the outline")]
    SpecialPointOutsideOutline { name: String, point: &'static str },
}

/// Errors related to graphs and target topologies.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("vertex not found: {0}")]
    VertexNotFound(String),

    #[error("duplicate vertex key: {0}")]
    DuplicateVertex(String),

    #[error("edge {0} -- {1} already exists")]
    DuplicateEdge(String, String),

    #[error("self-loop on vertex {0} is not allowed")]
    SelfLoop(String),

    #[error("edge {from} -- {to} does not connect to vertex {vertex}")]
    NotAnEndpoint {
        from: String,
        to: String,
        vertex: String,
    },

    #[error("a topology needs at least 2 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("the topology needs to be connected")]
    NotConnected,

    #[error("the topology needs to be planar")]
    NotPlanar,
}

/// Errors raised before any placement work starts: invalid generation
/// options, or a blueprint catalogue that cannot satisfy them.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("numberOfRooms ({0}) must be greater than 1")]
    NumberOfRoomsTooSmall(usize),

    #[error("maximumRoomDistance ({distance}) must be in 1..numberOfRooms ({rooms})")]
    RoomDistanceOutOfRange { distance: usize, rooms: usize },

    #[error("maxIterations ({iterations}) must be at least numberOfRooms ({rooms})")]
    IterationCapTooSmall { iterations: usize, rooms: usize },

    #[error("for {rooms} rooms the catalogue needs at least one single-door and one multi-door blueprint")]
    InfeasibleCatalogue { rooms: usize },

    #[error("the catalogue needs at least one spawn room blueprint")]
    MissingSpawnBlueprint,

    #[error("the catalogue needs at least one blueprint with door count {0}")]
    NoBlueprintForDoorCount(usize),

    #[error("no blueprint satisfies the constraints of topology vertex {vertex}")]
    NoBlueprintForVertex { vertex: String },

    #[error("room not found: {0}")]
    RoomNotFound(String),

    #[error("door index {door} out of range for room with {doors} doors")]
    DoorIndexOutOfRange { door: usize, doors: usize },

    #[error("door {door} of room {room} is already connected")]
    DoorAlreadyConnected { room: String, door: usize },
}

/// Convenience type alias for results using [`DungenError`].
pub type Result<T> = std::result::Result<T, DungenError>;
