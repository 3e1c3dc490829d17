pub mod scheduling_graph_dto;
